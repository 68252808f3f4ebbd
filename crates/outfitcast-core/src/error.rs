//! Centralized error types for Outfitcast.
//!
//! Every failure that reaches the stores or the UI is an [`AppError`]:
//! - a closed [`ErrorKind`] taxonomy callers can match on
//! - a human-readable message plus an optional machine code
//! - the wrapped provider error, kept for logging only
//!
//! Provider failures arrive as [`RawFailure`] or [`LocationFailure`] and are
//! turned into `AppError` by the functions in [`crate::classify`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared, clonable handle to the provider error an `AppError` wraps.
pub type SourceError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Closed classification of application failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Connectivity problems and timeouts.
    NetworkError,
    /// The remote service rejected or failed the request.
    ApiError,
    /// Malformed caller input.
    ValidationError,
    /// The user declined a capability grant.
    PermissionError,
    /// Nothing else applied.
    UnknownError,
}

impl ErrorKind {
    /// Type name, also used as the fallback machine code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::ApiError => "API_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::PermissionError => "PERMISSION_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "Unable to connect. Check your internet connection.",
            ErrorKind::ApiError => "The weather service could not complete the request.",
            ErrorKind::ValidationError => "Some of the input is invalid. Check and try again.",
            ErrorKind::PermissionError => "Permission was denied. Check your settings.",
            ErrorKind::UnknownError => "An unexpected error occurred. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level application error.
///
/// Immutable once built; clone it freely, the wrapped source is shared.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    code: Option<String>,
    #[source]
    source: Option<SourceError>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Attach a machine code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the original error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub(crate) fn with_shared_source(mut self, source: Option<SourceError>) -> Self {
        self.source = source;
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Code as stored; `None` when the error was created without one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn original(&self) -> Option<&SourceError> {
        self.source.as_ref()
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

/// Weather provider failure, before classification.
#[derive(Debug, Clone)]
pub enum RawFailure {
    /// The provider could not be reached (DNS, refused, reset, timeout).
    Connectivity {
        detail: String,
        source: Option<SourceError>,
    },
    /// The provider answered with a non-success status.
    Status {
        status: u16,
        detail: String,
    },
    /// Anything else: unparsable payloads, unknown places, client build errors.
    Other {
        detail: String,
        source: Option<SourceError>,
    },
}

impl RawFailure {
    pub fn connectivity(detail: impl Into<String>) -> Self {
        Self::Connectivity {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            detail: detail.into(),
        }
    }

    pub fn other(detail: impl Into<String>) -> Self {
        Self::Other {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            RawFailure::Connectivity { detail, .. }
            | RawFailure::Status { detail, .. }
            | RawFailure::Other { detail, .. } => detail,
        }
    }
}

/// Geolocation failure, using the platform's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LocationFailure {
    PermissionDenied = 1,
    PositionUnavailable = 2,
    Timeout = 3,
}

impl LocationFailure {
    /// Parse a platform code; `None` for anything outside 1..=3.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Extension trait for converting reqwest errors into classifier input.
pub trait ReqwestErrorExt {
    fn into_raw_failure(self) -> RawFailure;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_raw_failure(self) -> RawFailure {
        let detail = self.to_string();
        if self.is_timeout() || self.is_connect() {
            RawFailure::Connectivity {
                detail,
                source: Some(Arc::new(self)),
            }
        } else if let Some(status) = self.status() {
            RawFailure::Status {
                status: status.as_u16(),
                detail,
            }
        } else if self.is_decode() || self.is_body() || self.is_builder() {
            RawFailure::Other {
                detail,
                source: Some(Arc::new(self)),
            }
        } else {
            RawFailure::Connectivity {
                detail,
                source: Some(Arc::new(self)),
            }
        }
    }
}
