use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, as produced by the location resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Normalized point-in-time weather reading.
///
/// Only ever constructed from a schema-valid provider response; held by the
/// presentation layer until the next fetch replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub temperature_c: f64,
    pub condition: String,
}

/// What the screen should currently show.
///
/// Starts at `Loading`. Every fetch attempt ends in exactly one of `Loaded`
/// or `Failed`, and starting a new attempt moves back to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(WeatherSnapshot),
    Failed,
}
