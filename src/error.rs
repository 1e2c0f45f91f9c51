//! Error types for xcatch
//!
//! This module defines the error hierarchy for the entire SDK and the
//! retry classification used by the retry driver.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Business code the upstream uses for "rate limit exceeded"
pub const RATE_LIMIT_CODE: i64 = 88;

/// An error reported by the upstream API, either through a non-2xx HTTP
/// status or through a failing business code inside a 2xx envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status}, code={code}, message={message}")]
pub struct ApiError {
    /// HTTP status of the response
    pub status: u16,
    /// Business code from the body (0 when absent)
    pub code: i64,
    /// Best-effort message
    pub message: String,
    /// Unmodified response body
    pub raw_body: String,
}

impl ApiError {
    /// Create an API error
    pub fn new(
        status: u16,
        code: i64,
        message: impl Into<String>,
        raw_body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            raw_body: raw_body.into(),
        }
    }

    /// Upstream signalled rate limiting (business code 88 or HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        self.code == RATE_LIMIT_CODE || self.status == 429
    }

    /// HTTP 403, which the upstream uses for temporary account locks
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// HTTP 401, a missing or invalid credential
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Check if the request should be retried
    pub fn is_retryable(&self) -> bool {
        if self.is_unauthorized() {
            return false;
        }
        self.is_rate_limited() || self.is_forbidden()
    }
}

/// The main error type for xcatch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("auth_token is required for this endpoint")]
    AuthTokenRequired,

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Fallback for a retry sequence that ends with no recorded error
    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode {stage}: {source} (payload: {snippet})")]
    Decode {
        stage: &'static str,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error with a truncated payload snippet
    pub fn decode(stage: &'static str, payload: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            stage,
            snippet: crate::decode::truncate(payload, crate::decode::SNIPPET_LIMIT),
            source,
        }
    }

    /// The upstream API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Cancellation or deadline expiry of the caller's context
    pub fn is_context(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api(e) => e.is_retryable(),
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for xcatch
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
