//! Error types for stripe-source
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Per-resource fetch errors never reach the batch stream; they are logged
//! and the resource is skipped. Serialization faults end the run.

use thiserror::Error;

/// The main error type for stripe-source
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Stripe API Errors
    // ============================================================================
    #[error("Stripe API error ({status}, {error_type}): {message}")]
    StripeApi {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("Malformed list response for '{resource}': {message}")]
    MalformedResponse { resource: String, message: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to serialize field '{field}': {message}")]
    Serialization { field: String, message: String },

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

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the vendor rejected the credential
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } | Error::StripeApi { status, .. } => {
                matches!(status, 401 | 403)
            }
            _ => false,
        }
    }
}

/// Result type alias for stripe-source
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
