/// Error classification for the data the viewers display
///
/// Hand records and job series are fetched by the embedding application. This module
/// gives every fetch failure one of three display classes (private data, missing data,
/// anything else) plus the distinct invalid-game-data condition raised by validation.
use handlens_analytics::AnalyticsError;
use handlens_engine::errors::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structured form of an error, suitable for JSON output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    pub retryable: bool,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Caused by the request or the data; expected
    Client,
    /// Caused by the serving side; worth retrying or investigating
    Server,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Request failed: {message}")]
    Retryable {
        status: Option<u16>,
        message: String,
    },
    #[error("Invalid game data: {0}")]
    InvalidGameData(String),
}

impl FetchError {
    /// Classifies a failed response by its HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => FetchError::AccessDenied(message),
            404 => FetchError::NotFound(message),
            _ => FetchError::Retryable {
                status: Some(status),
                message,
            },
        }
    }

    /// A failure with no response at all (connection reset, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Retryable {
            status: None,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::AccessDenied(_) => "access_denied",
            FetchError::NotFound(_) => "not_found",
            FetchError::Retryable { .. } => "fetch_failed",
            FetchError::InvalidGameData(_) => "invalid_game_data",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Retryable { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FetchError::Retryable {
                status: Some(status),
                ..
            } if *status < 500 => ErrorSeverity::Client,
            FetchError::Retryable { .. } => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }

    /// Emits the error at a level matching its severity.
    pub fn log(&self) {
        match self.severity() {
            ErrorSeverity::Client => tracing::warn!(
                error_code = self.error_code(),
                error = %self,
                "fetch rejected"
            ),
            ErrorSeverity::Server => tracing::error!(
                error_code = self.error_code(),
                error = %self,
                "fetch failed"
            ),
        }
    }
}

impl From<RecordError> for FetchError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidGameData { reason } => FetchError::InvalidGameData(reason),
            RecordError::Malformed(inner) => FetchError::InvalidGameData(inner.to_string()),
        }
    }
}

impl From<AnalyticsError> for FetchError {
    fn from(err: AnalyticsError) -> Self {
        FetchError::InvalidGameData(err.to_string())
    }
}
