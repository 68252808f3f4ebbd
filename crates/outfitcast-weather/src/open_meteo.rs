//! Open-Meteo backed [`WeatherProvider`].
//! Free, no API key required; city names are resolved with the Open-Meteo
//! geocoding endpoint first.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use outfitcast_core::{AppError, ErrorClassifier, RawFailure, ReqwestErrorExt, WeatherConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::provider::{validate_city_name, WeatherProvider};
use crate::types::{Coordinates, WeatherCondition, WeatherObservation};

const USER_AGENT: &str = "Outfitcast/0.1.0";
const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: f64,
    apparent_temperature: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Arc<Client>,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, AppError> {
        Self::with_urls(&config.forecast_url, &config.geocoding_url, config.timeout())
    }

    pub fn with_urls(
        forecast_url: &str,
        geocoding_url: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ErrorClassifier::classify_weather_failure(e.into_raw_failure()))?;

        Ok(Self {
            client: Arc::new(client),
            forecast_url: forecast_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
        })
    }

    async fn resolve_city(&self, name: &str) -> Result<Coordinates, RawFailure> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[("name", name), ("count", "1"), ("format", "json")])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_raw_failure)?;

        let body: GeocodingResponse = Self::handle_response(response).await?;
        body.results
            .into_iter()
            .next()
            .map(|r| Coordinates::new(r.latitude, r.longitude))
            .ok_or_else(|| RawFailure::other(format!("No location found for '{}'", name)))
    }

    async fn fetch_current(
        &self,
        coords: Coordinates,
        label: String,
    ) -> Result<WeatherObservation, RawFailure> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();
        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("wind_speed_unit", "ms"),
                ("timezone", "UTC"),
            ])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_raw_failure)?;

        let body: ForecastResponse = Self::handle_response(response).await?;
        Ok(Self::to_observation(body.current, label))
    }

    fn to_observation(current: CurrentBlock, label: String) -> WeatherObservation {
        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok())
            .map(|t| t.and_utc())
            .unwrap_or_else(Utc::now);

        let condition = current
            .weather_code
            .map(WeatherCondition::from_wmo_code)
            .unwrap_or_default();

        let mut observation = WeatherObservation::new(label, current.temperature_2m, condition)
            .with_humidity(current.relative_humidity_2m.unwrap_or_default())
            .with_wind_speed(current.wind_speed_10m.unwrap_or_default())
            .observed_at(observed_at);
        observation.feels_like = current.apparent_temperature;
        observation
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RawFailure> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| RawFailure::Other {
                detail: format!("JSON parse error: {}", e),
                source: Some(Arc::new(e)),
            })
        } else {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Open-Meteo returned status {}: {}", status, text);
            Err(RawFailure::status(status.as_u16(), text))
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self), level = "info")]
    async fn get_current_weather(&self, lat: f64, lon: f64) -> Result<WeatherObservation, AppError> {
        let label = format!("{:.4}, {:.4}", lat, lon);
        self.fetch_current(Coordinates::new(lat, lon), label)
            .await
            .map_err(ErrorClassifier::classify_weather_failure)
    }

    #[instrument(skip(self), level = "info")]
    async fn get_weather_by_city(&self, name: &str) -> Result<WeatherObservation, AppError> {
        let name = validate_city_name(name)?;

        let result = match self.resolve_city(name).await {
            Ok(coords) => self.fetch_current(coords, name.to_string()).await,
            Err(e) => Err(e),
        };
        result.map_err(ErrorClassifier::classify_weather_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(time: Option<&str>, apparent: Option<f64>, code: Option<i32>) -> CurrentBlock {
        CurrentBlock {
            time: time.map(str::to_string),
            temperature_2m: 15.0,
            apparent_temperature: apparent,
            relative_humidity_2m: Some(65.0),
            wind_speed_10m: Some(2.5),
            weather_code: code,
        }
    }

    #[test]
    fn test_observation_from_full_block() {
        let obs = OpenMeteoProvider::to_observation(
            block(Some("2026-01-30T12:00"), Some(13.0), Some(61)),
            "Shibuya".to_string(),
        );
        assert_eq!(obs.location, "Shibuya");
        assert_eq!(obs.feels_like, Some(13.0));
        assert_eq!(obs.condition, WeatherCondition::Rainy);
        assert_eq!(obs.humidity, 65.0);
        assert_eq!(obs.observed_at.to_rfc3339(), "2026-01-30T12:00:00+00:00");
    }

    #[test]
    fn test_missing_apparent_temperature_falls_back() {
        let obs = OpenMeteoProvider::to_observation(block(None, None, None), "x".to_string());
        assert_eq!(obs.feels_like, None);
        assert_eq!(obs.perceived_temperature(), 15.0);
        assert_eq!(obs.condition, WeatherCondition::Sunny);
    }
}
