//! Error handling types
//!
//! Two layers of errors live here:
//!
//! - [`ApiError`] is the structured failure returned by a dispatch (router
//!   or client). Callers branch on [`ErrorCode`], never on the message.
//! - [`Error`] covers everything around a dispatch: configuration loading,
//!   logging setup, file and JSON handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for request dispatch
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Machine-readable failure class of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No registered route matches the request
    NotFound,
    /// Authentication required and absent or invalid
    Unauthorized,
    /// Request quota exceeded for the current window
    RateLimited,
    /// Injected or real transport failure, including timeouts
    NetworkError,
    /// Handler rejected its input
    ValidationError,
    /// Handler failed for a reason unrelated to its input
    Internal,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RateLimited => "RATE_LIMITED",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// HTTP status a real backend would answer with
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Unauthorized => 401,
            Self::RateLimited => 429,
            Self::NetworkError => 503,
            Self::ValidationError => 422,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured dispatch failure
///
/// Every failure a caller sees from the router or a client carries a code,
/// a human-readable message, optional details and the time it was raised.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Failure class
    pub code: ErrorCode,
    /// Human-readable description
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// When the error was raised
    pub timestamp: DateTime<Utc>,
    /// Milliseconds until a rate-limit window resets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

impl ApiError {
    /// Create an error with the given code and message
    pub fn new<S: Into<String>>(code: ErrorCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
            retry_after_ms: None,
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a rate limited error carrying the time until the window resets
    pub fn rate_limited<S: Into<String>>(message: S, reset_after: Duration) -> Self {
        let mut error = Self::new(ErrorCode::RateLimited, message);
        error.retry_after_ms = Some(u64::try_from(reset_after.as_millis()).unwrap_or(u64::MAX));
        error
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Attach structured details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Time until a rate-limit window resets, if known
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_ms.map(Duration::from_millis)
    }

    /// Whether the client layer may retry this failure on its own
    ///
    /// Only transport-class failures qualify; retrying an auth or input
    /// failure cannot succeed without caller action.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::NetworkError
    }
}

/// Error type for everything around a dispatch
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// A dispatch failed while the caller expected success
    #[error("Request failed: {0}")]
    Api(#[from] ApiError),

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// The dispatch error code, when this wraps a dispatch failure
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}
