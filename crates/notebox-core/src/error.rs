//! Error types for notebox-core

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using notebox-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notebox-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (connection refused, invalid body, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the notes backend.
    ///
    /// `message` is the backend's `error` field when present, otherwise the
    /// HTTP status text.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 2xx response whose body does not fit the endpoint's contract
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid client configuration (base URL, config file)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Draft rejected before reaching the network
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

