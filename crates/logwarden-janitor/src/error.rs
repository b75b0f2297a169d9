//! Error types for Janitor operations

use logwarden_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for Janitor operations
pub type Result<T> = std::result::Result<T, JanitorError>;

/// Errors that can occur during Janitor operations
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Rewriting engine or schedule validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// File-system error on a managed path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read, written or removed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JanitorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JanitorError::Io {
            path: path.into(),
            source,
        }
    }
}
