//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Janitor error
    #[error(transparent)]
    Janitor(#[from] logwarden_janitor::JanitorError),

    /// I/O error on a file named on the command line
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Some files could not be rewritten
    #[error("{0} file(s) could not be rewritten")]
    FilesFailed(usize),
}

