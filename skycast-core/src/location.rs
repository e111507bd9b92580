//! Resolving the device's current coordinates.
//!
//! The platform service sits behind [`PositionSource`]; the flow itself is
//! [`resolve_location`]: ask for permission first, and only read a position
//! once it is granted.

use crate::{error::WeatherError, model::Coordinates};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Outcome of a foreground permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform service that can answer a permission request and produce a
/// single current-position reading.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn request_permission(&self) -> Permission;

    async fn current_position(&self) -> Result<Coordinates, WeatherError>;
}

/// Resolve the device's current coordinates.
///
/// If permission is denied, fails with [`WeatherError::PermissionDenied`]
/// without touching the position service. No retries; any timeout is the
/// platform's own.
pub async fn resolve_location(source: &dyn PositionSource) -> Result<Coordinates, WeatherError> {
    match source.request_permission().await {
        Permission::Denied => {
            tracing::warn!("location permission denied");
            Err(WeatherError::PermissionDenied)
        }
        Permission::Granted => source.current_position().await,
    }
}

/// IP-based geolocation, the position backend on machines without GPS.
///
/// Coarse (city-level at best), and it ships the public IP to a third
/// party, so the lookup is gated on a stored consent flag that stands in
/// for the mobile permission grant.
#[derive(Debug, Clone)]
pub struct IpPositionSource {
    http: Client,
    endpoint: String,
    consent: bool,
}

impl IpPositionSource {
    pub fn new(consent: bool) -> Self {
        Self::with_endpoint(consent, GEOLOCATION_URL.to_string())
    }

    /// Point the lookup at a different endpoint, e.g. a local test server.
    pub fn with_endpoint(consent: bool, endpoint: String) -> Self {
        Self { http: Client::new(), endpoint, consent }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl PositionSource for IpPositionSource {
    async fn request_permission(&self) -> Permission {
        if self.consent { Permission::Granted } else { Permission::Denied }
    }

    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        let res = self.http.get(&self.endpoint).send().await.map_err(|err| {
            tracing::warn!(error = %err, "geolocation request failed");
            WeatherError::LocationUnavailable
        })?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "geolocation service returned an error");
            return Err(WeatherError::LocationUnavailable);
        }

        let parsed: IpApiResponse = res.json().await.map_err(|err| {
            tracing::warn!(error = %err, "geolocation response could not be parsed");
            WeatherError::LocationUnavailable
        })?;

        Ok(Coordinates { latitude: parsed.latitude, longitude: parsed.longitude })
    }
}

/// Fixed coordinates supplied by the user, bypassing any platform lookup.
/// Permission is always granted.
#[derive(Debug, Clone, Copy)]
pub struct StaticPositionSource {
    coords: Coordinates,
}

impl StaticPositionSource {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl PositionSource for StaticPositionSource {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        Ok(self.coords)
    }
}
