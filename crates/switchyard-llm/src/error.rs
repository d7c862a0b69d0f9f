//! Error types for switchyard-llm

use thiserror::Error;

/// Provider and routing error type
#[derive(Debug, Error)]
pub enum Error {
    /// Upstream answered with a non-success status
    #[error("upstream returned {status} {reason}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase (or sanitized body when none)
        reason: String,
    },

    /// Upstream body could not be interpreted
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Transport-level fault
    #[error("network error: {0}")]
    Network(String),

    /// Deadline elapsed before the provider finished
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Invocation cancelled from outside (shutdown)
    #[error("invocation cancelled")]
    Cancelled,

    /// Any other provider failure
    #[error("provider error: {0}")]
    Provider(String),
}

impl Error {
    /// Whether this error came from the deadline rather than the upstream
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
