//! Screen-side state container for the weather view.

use tokio::sync::watch;

pub use tokio_util::sync::CancellationToken;

use crate::{
    location::{self, PositionSource},
    model::LoadState,
    provider::WeatherFetcher,
};

/// Owns the [`LoadState`] the presentation layer renders.
///
/// The state changes only through [`refresh`](WeatherScreen::refresh);
/// readers either poll [`state`](WeatherScreen::state) or watch for changes
/// through [`subscribe`](WeatherScreen::subscribe).
#[derive(Debug)]
pub struct WeatherScreen {
    tx: watch::Sender<LoadState>,
}

impl WeatherScreen {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LoadState::Loading);
        Self { tx }
    }

    /// Current state, cloned out of the container.
    pub fn state(&self) -> LoadState {
        self.tx.borrow().clone()
    }

    /// Watch for state changes; the receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.tx.subscribe()
    }

    /// Run one full fetch attempt: resolve the location, fetch the weather,
    /// and leave the state at `Loaded` or `Failed`.
    ///
    /// One sequential chain, no parallel branches: permission request, then
    /// position read, then network fetch. The token is checked before every
    /// state write, so a refresh raced by screen teardown drops its result
    /// instead of publishing a stale one.
    pub async fn refresh(
        &self,
        source: &dyn PositionSource,
        fetcher: &dyn WeatherFetcher,
        cancel: &CancellationToken,
    ) {
        if cancel.is_cancelled() {
            return;
        }
        self.tx.send_replace(LoadState::Loading);

        let coords = match location::resolve_location(source).await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!(error = %err, "location resolution failed");
                self.finish(LoadState::Failed, cancel);
                return;
            }
        };

        if cancel.is_cancelled() {
            tracing::debug!("screen torn down before the weather fetch, stopping");
            return;
        }

        match fetcher.fetch_weather(coords).await {
            Ok(snapshot) => self.finish(LoadState::Loaded(snapshot), cancel),
            Err(err) => {
                tracing::warn!(error = %err, "weather fetch failed");
                self.finish(LoadState::Failed, cancel);
            }
        }
    }

    fn finish(&self, state: LoadState, cancel: &CancellationToken) {
        if cancel.is_cancelled() {
            tracing::debug!("screen torn down mid-fetch, dropping result");
            return;
        }
        self.tx.send_replace(state);
    }
}

impl Default for WeatherScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::location::Permission;
    use crate::model::{Coordinates, WeatherSnapshot};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city_name: "Paris".to_string(),
            temperature_c: 18.5,
            condition: "Clouds".to_string(),
        }
    }

    struct StubSource {
        permission: Permission,
        cancel_on_read: Option<CancellationToken>,
    }

    impl StubSource {
        fn granted() -> Self {
            Self { permission: Permission::Granted, cancel_on_read: None }
        }

        fn denied() -> Self {
            Self { permission: Permission::Denied, cancel_on_read: None }
        }

        fn cancelling(token: CancellationToken) -> Self {
            Self { permission: Permission::Granted, cancel_on_read: Some(token) }
        }
    }

    #[async_trait]
    impl PositionSource for StubSource {
        async fn request_permission(&self) -> Permission {
            self.permission
        }

        async fn current_position(&self) -> Result<Coordinates, WeatherError> {
            if let Some(token) = &self.cancel_on_read {
                token.cancel();
            }
            Ok(Coordinates { latitude: 48.8566, longitude: 2.3522 })
        }
    }

    #[derive(Debug, Default)]
    struct StubFetcher {
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn failing() -> Self {
            Self { fail: true, calls: AtomicUsize::new(0) }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherFetcher for StubFetcher {
        async fn fetch_weather(
            &self,
            _coords: Coordinates,
        ) -> Result<WeatherSnapshot, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(WeatherError::Provider(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
            } else {
                Ok(sample_snapshot())
            }
        }
    }

    #[tokio::test]
    async fn starts_in_loading() {
        let screen = WeatherScreen::new();
        assert_eq!(screen.state(), LoadState::Loading);
    }

    #[tokio::test]
    async fn successful_refresh_ends_loaded() {
        let screen = WeatherScreen::new();
        let fetcher = StubFetcher::default();

        screen
            .refresh(&StubSource::granted(), &fetcher, &CancellationToken::new())
            .await;

        assert_eq!(screen.state(), LoadState::Loaded(sample_snapshot()));
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn provider_error_ends_failed() {
        let screen = WeatherScreen::new();
        let fetcher = StubFetcher::failing();

        screen
            .refresh(&StubSource::granted(), &fetcher, &CancellationToken::new())
            .await;

        assert_eq!(screen.state(), LoadState::Failed);
    }

    #[tokio::test]
    async fn denied_permission_ends_failed_without_fetching() {
        let screen = WeatherScreen::new();
        let fetcher = StubFetcher::default();

        screen
            .refresh(&StubSource::denied(), &fetcher, &CancellationToken::new())
            .await;

        // Resolves to Failed rather than sitting in Loading forever.
        assert_eq!(screen.state(), LoadState::Failed);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_refresh_never_starts() {
        let screen = WeatherScreen::new();
        let fetcher = StubFetcher::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        screen.refresh(&StubSource::granted(), &fetcher, &cancel).await;

        assert_eq!(screen.state(), LoadState::Loading);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn teardown_mid_attempt_drops_the_result() {
        let screen = WeatherScreen::new();
        let fetcher = StubFetcher::default();
        let cancel = CancellationToken::new();

        screen
            .refresh(&StubSource::cancelling(cancel.clone()), &fetcher, &cancel)
            .await;

        // Cancelled between the position read and the fetch: the request is
        // never issued and no state is published.
        assert_eq!(screen.state(), LoadState::Loading);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn new_refresh_moves_back_to_loading() {
        let screen = WeatherScreen::new();

        screen
            .refresh(&StubSource::denied(), &StubFetcher::default(), &CancellationToken::new())
            .await;
        assert_eq!(screen.state(), LoadState::Failed);

        // Second attempt gets torn down mid-flight, so the state it leaves
        // behind is the Loading it re-entered at the start of the attempt.
        let cancel = CancellationToken::new();
        screen
            .refresh(&StubSource::cancelling(cancel.clone()), &StubFetcher::default(), &cancel)
            .await;
        assert_eq!(screen.state(), LoadState::Loading);
    }

    #[tokio::test]
    async fn subscribers_observe_the_final_state() {
        let screen = WeatherScreen::new();
        let mut rx = screen.subscribe();
        assert_eq!(*rx.borrow_and_update(), LoadState::Loading);

        screen
            .refresh(&StubSource::granted(), &StubFetcher::default(), &CancellationToken::new())
            .await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), LoadState::Loaded(sample_snapshot()));
    }
}
