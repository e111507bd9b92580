use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can end a fetch attempt early, from the permission
/// request through the provider call.
///
/// Every variant is terminal for the current attempt; nothing here is
/// retried. The presentation layer collapses all of them into the same
/// "failed to load" state, so the detail only matters for diagnostics.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The user declined the foreground location permission.
    #[error("location permission was denied")]
    PermissionDenied,

    /// Permission was granted but the platform could not produce a reading.
    #[error("platform could not produce a position reading")]
    LocationUnavailable,

    /// The weather provider answered with a non-success status.
    #[error("weather provider responded with status {0}")]
    Provider(StatusCode),

    /// The provider body was missing a required field or had the wrong shape.
    #[error("malformed weather response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure of the weather HTTP call.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
