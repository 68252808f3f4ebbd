use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weather condition categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    #[default]
    Sunny,
    #[serde(alias = "partly_cloudy", alias = "partly cloudy")]
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Foggy,
    Windy,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Sunny,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Foggy,
            51..=57 | 61..=67 | 80..=82 => Self::Rainy,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snowy,
            95 | 96 | 99 => Self::Stormy,
            _ => Self::Sunny, // Unknown codes default to clear
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Stormy => "Stormy",
            Self::Foggy => "Foggy",
            Self::Windy => "Windy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::PartlyCloudy => "🌤️",
            Self::Cloudy => "☁️",
            Self::Rainy => "🌧️",
            Self::Snowy => "❄️",
            Self::Stormy => "⛈️",
            Self::Foggy => "🌫️",
            Self::Windy => "💨",
        }
    }
}

/// Error returned when a condition label is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weather condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for WeatherCondition {
    type Err = UnknownCondition;

    /// Accepts the labels providers commonly use ("partly_cloudy", "rain", "clear", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();

        match normalized.as_str() {
            "sunny" | "clear" => Ok(Self::Sunny),
            "partlycloudy" => Ok(Self::PartlyCloudy),
            "cloudy" | "overcast" => Ok(Self::Cloudy),
            "rainy" | "rain" | "drizzle" | "showers" => Ok(Self::Rainy),
            "snowy" | "snow" | "sleet" => Ok(Self::Snowy),
            "stormy" | "storm" | "thunderstorm" => Ok(Self::Stormy),
            "foggy" | "fog" | "mist" => Ok(Self::Foggy),
            "windy" | "wind" => Ok(Self::Windy),
            _ => Err(UnknownCondition(s.to_string())),
        }
    }
}

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current conditions at one location.
///
/// Observations are replaced wholesale on refresh, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Location identifier the observation was requested for
    pub location: String,
    /// Ambient temperature in °C
    pub temperature: f64,
    /// Perceived temperature in °C, when the provider supplies one
    pub feels_like: Option<f64>,
    pub condition: WeatherCondition,
    /// Relative humidity, 0-100
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

impl WeatherObservation {
    pub fn new(location: impl Into<String>, temperature: f64, condition: WeatherCondition) -> Self {
        Self {
            location: location.into(),
            temperature,
            feels_like: None,
            condition,
            humidity: 0.0,
            wind_speed: 0.0,
            observed_at: Utc::now(),
        }
    }

    pub fn with_feels_like(mut self, feels_like: f64) -> Self {
        self.feels_like = Some(feels_like);
        self
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = humidity.clamp(0.0, 100.0);
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed.max(0.0);
        self
    }

    pub fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = at;
        self
    }

    /// Perceived temperature, falling back to the ambient reading.
    pub fn perceived_temperature(&self) -> f64 {
        self.feels_like.unwrap_or(self.temperature)
    }
}
