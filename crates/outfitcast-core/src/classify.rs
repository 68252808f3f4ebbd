//! Maps provider failures onto the [`AppError`] taxonomy.
//!
//! Classification is total: every input produces exactly one `AppError`.

use crate::error::{AppError, ErrorKind, LocationFailure, RawFailure};

pub const WEATHER_NETWORK_ERROR: &str = "WEATHER_NETWORK_ERROR";
pub const WEATHER_AUTH_ERROR: &str = "WEATHER_AUTH_ERROR";
pub const WEATHER_RATE_LIMIT: &str = "WEATHER_RATE_LIMIT";
pub const WEATHER_GENERAL_ERROR: &str = "WEATHER_GENERAL_ERROR";
pub const WEATHER_INVALID_CITY: &str = "WEATHER_INVALID_CITY";
pub const LOCATION_PERMISSION_DENIED: &str = "LOCATION_PERMISSION_DENIED";
pub const LOCATION_UNAVAILABLE: &str = "LOCATION_UNAVAILABLE";
pub const LOCATION_TIMEOUT: &str = "LOCATION_TIMEOUT";
pub const LOCATION_UNKNOWN_ERROR: &str = "LOCATION_UNKNOWN_ERROR";

/// Stateless classifier for weather and location failures.
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Build an error with optional code.
    pub fn create_error(kind: ErrorKind, message: impl Into<String>, code: Option<&str>) -> AppError {
        let err = AppError::new(kind, message);
        match code {
            Some(code) => err.with_code(code),
            None => err,
        }
    }

    pub fn classify_weather_failure(raw: RawFailure) -> AppError {
        match raw {
            RawFailure::Connectivity { source, .. } => AppError::new(
                ErrorKind::NetworkError,
                "Unable to connect to weather service. Please check your internet connection.",
            )
            .with_code(WEATHER_NETWORK_ERROR)
            .with_shared_source(source),
            RawFailure::Status { status: 401, .. } => AppError::new(
                ErrorKind::ApiError,
                "Weather service authentication failed. Please check the API key.",
            )
            .with_code(WEATHER_AUTH_ERROR),
            RawFailure::Status { status: 429, .. } => AppError::new(
                ErrorKind::ApiError,
                "Weather service rate limit exceeded. Please try again later.",
            )
            .with_code(WEATHER_RATE_LIMIT),
            RawFailure::Status { .. } => AppError::new(
                ErrorKind::ApiError,
                "Failed to fetch weather data. Please try again.",
            )
            .with_code(WEATHER_GENERAL_ERROR),
            RawFailure::Other { source, .. } => AppError::new(
                ErrorKind::ApiError,
                "Failed to fetch weather data. Please try again.",
            )
            .with_code(WEATHER_GENERAL_ERROR)
            .with_shared_source(source),
        }
    }

    pub fn classify_location_failure(failure: LocationFailure) -> AppError {
        match failure {
            LocationFailure::PermissionDenied => AppError::new(
                ErrorKind::PermissionError,
                "Location access denied. Please enable location services.",
            )
            .with_code(LOCATION_PERMISSION_DENIED),
            LocationFailure::PositionUnavailable => AppError::new(
                ErrorKind::ApiError,
                "Location information is unavailable.",
            )
            .with_code(LOCATION_UNAVAILABLE),
            LocationFailure::Timeout => AppError::new(
                ErrorKind::NetworkError,
                "Location request timed out. Please try again.",
            )
            .with_code(LOCATION_TIMEOUT),
        }
    }

    /// Classify a raw platform code, including codes outside the known three.
    pub fn classify_location_code(code: i32) -> AppError {
        match LocationFailure::from_code(code) {
            Some(failure) => Self::classify_location_failure(failure),
            None => AppError::new(
                ErrorKind::UnknownError,
                format!("Unknown location error (code {code})."),
            )
            .with_code(LOCATION_UNKNOWN_ERROR),
        }
    }

    pub fn get_error_message(error: &AppError) -> &str {
        error.message()
    }

    /// Stored code, or the kind's type name when none was set.
    pub fn get_error_code(error: &AppError) -> &str {
        error.code().unwrap_or_else(|| error.kind().as_str())
    }

    pub fn log_error(error: &AppError) {
        tracing::error!(
            kind = %error.kind(),
            code = Self::get_error_code(error),
            original = ?error.original().map(|e| e.to_string()),
            "Application error: {}",
            error.message()
        );
    }
}
