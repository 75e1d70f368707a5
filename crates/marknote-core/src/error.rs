//! Error types for marknote-core

use thiserror::Error;

/// Result type alias using marknote-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in marknote-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error talking to the remote store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store rejected the request
    #[error("Remote store error: {0}")]
    Api(String),

    /// Remote store answered with a payload we cannot interpret
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote store is not reachable
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),
}
