//! # API Client Error Types
//!
//! Error types for remote storefront access.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     API Client Error Categories                         │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  NotFound       (404)   │ │
//! │  │  InvalidUrl     │  │  (connect,      │  │  Validation     (400)   │ │
//! │  │  Io / Toml      │  │   timeout)      │  │  Unauthorized   (401)   │ │
//! │  │                 │  │                 │  │  Remote         (other) │ │
//! │  │                 │  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No request is retried. A failed call leaves remote state as it was
//! before that call.

use thiserror::Error;

/// Result type alias for API client operations.
pub type ApiResult<T> = Result<T, ApiClientError>;

/// Failures talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Malformed base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or write the config file.
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Connection, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The resource does not exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API rejected the request body (400).
    #[error("Rejected by API: {0}")]
    Validation(String),

    /// The API refused the caller (401 / 403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status.
    #[error("API returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<url::ParseError> for ApiClientError {
    fn from(err: url::ParseError) -> Self {
        ApiClientError::InvalidUrl(err.to_string())
    }
}

impl ApiClientError {
    /// True for a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiClientError::NotFound(_))
    }
}
