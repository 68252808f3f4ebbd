//! The seam between Outfitcast and whatever supplies weather data.

use async_trait::async_trait;
use outfitcast_core::classify::WEATHER_INVALID_CITY;
use outfitcast_core::AppError;

use crate::types::WeatherObservation;

/// Source of current weather conditions.
///
/// Calls are single-shot: implementations must not retry internally, and
/// every failure is returned already classified.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a coordinate pair.
    ///
    /// Coordinates are not range-checked; out-of-range values are forwarded
    /// and whatever the source answers is returned.
    async fn get_current_weather(&self, lat: f64, lon: f64) -> Result<WeatherObservation, AppError>;

    /// Current conditions for a place name.
    ///
    /// Empty names fail with a validation error before any request is made.
    async fn get_weather_by_city(&self, name: &str) -> Result<WeatherObservation, AppError>;
}

/// Trimmed city name, or a validation error when nothing is left.
pub fn validate_city_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("City name must not be empty.").with_code(WEATHER_INVALID_CITY));
    }
    Ok(trimmed)
}
