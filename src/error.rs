//! Error types for the tweezers library.

use thiserror::Error;

/// Errors returned by the tweezers library.
#[derive(Debug, Error)]
pub enum TweezersError {
    /// Credentials or other configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument was out of range or unparseable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON in Twitter API response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned a payload that could not be interpreted.
    #[error("Malformed Twitter API response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// The Twitter API answered with a non-success status and nothing was collected.
    #[error("Twitter API error for operation '{operation}' ({status})")]
    Api { operation: String, status: u16 },

    /// The very first page of a search came back empty.
    #[error("Search criteria didn't return any results.")]
    NoResults,
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TweezersError>;
