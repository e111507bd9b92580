use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
};

use super::WeatherFetcher;

const API_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for OpenWeather's current-weather-by-coordinates endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a local test server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Provider(status));
        }

        let body = res.text().await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|err| WeatherError::MalformedResponse(err.to_string()))?;

        let condition = parsed
            .weather
            .first()
            .ok_or_else(|| WeatherError::MalformedResponse("weather array is empty".to_string()))?;

        Ok(WeatherSnapshot {
            city_name: parsed.name,
            temperature_c: parsed.main.temp,
            condition: condition.main.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherFetcher for OpenWeatherProvider {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_current(coords).await
    }
}
