//! Error types for geo-lookup

use thiserror::Error;

/// Main error type for geo-lookup operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success HTTP status
    #[error("{provider} returned status: {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    /// Provider answered 2xx but the body was not the expected JSON
    #[error("Failed to parse {provider} response: {source}")]
    Decode {
        provider: &'static str,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required credential or input was empty
    #[error("Missing {0}")]
    Missing(String),

    /// Provider reported an error inside a successful response
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for geo-lookup operations
pub type Result<T> = std::result::Result<T, Error>;
