//! Error types for registration operations.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! serialization, missing credentials, and HTTP transport or status errors.

use thiserror::Error;

/// Errors that can occur while storing, logging or registering commands.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// No bot token configured.
    #[error("missing bot token")]
    MissingToken,

    /// No application id configured.
    #[error("missing application id")]
    MissingApplicationId,

    /// The API answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, TLS or protocol failure.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<ureq::Error> for RegistryError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => RegistryError::Status(code),
            other => RegistryError::Http(other.to_string()),
        }
    }
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
