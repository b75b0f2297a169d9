//! Error types for the rewriting engine and schedule parser

use thiserror::Error;

/// Result alias used throughout the domain crate
pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors raised by the pure engine
///
/// Every variant is a local, synchronous failure. Callers must not persist
/// output produced by a call that returned one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Stanza carries no daily/weekly/monthly/yearly directive
    #[error("Unrecognized interval: stanza has no daily, weekly, monthly or yearly directive")]
    UnrecognizedInterval,

    /// Unbalanced or unparsable brace block
    #[error("Malformed stanza at line {line}: {reason}")]
    MalformedStanza {
        /// 1-based line number where scanning failed
        line: usize,
        /// What the scanner found
        reason: String,
    },

    /// Schedule string or enabled/frequency pair failed validation
    #[error("Invalid cron config: {0}")]
    InvalidCronConfig(String),

    /// No crontab line runs the daily trigger
    #[error("Crontab entry not found: no line runs '{0}'")]
    CrontabEntryNotFound(String),
}

impl DomainError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        DomainError::MalformedStanza {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_cron(reason: impl Into<String>) -> Self {
        DomainError::InvalidCronConfig(reason.into())
    }
}
