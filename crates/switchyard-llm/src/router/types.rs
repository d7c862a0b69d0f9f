//! Router types

use crate::error::Error;
use crate::providers::TokenUsage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Deadline Policy
// ============================================================================

/// How the fallback attempt's deadline relates to the primary's
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlinePolicy {
    /// Each hop gets a fresh deadline of the full timeout
    #[default]
    PerHop,
    /// Both hops share one deadline; the fallback gets what is left
    Shared,
}

impl fmt::Display for DeadlinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerHop => f.write_str("per_hop"),
            Self::Shared => f.write_str("shared"),
        }
    }
}

impl FromStr for DeadlinePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per_hop" => Ok(Self::PerHop),
            "shared" => Ok(Self::Shared),
            other => Err(format!("unknown deadline policy: {other}")),
        }
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Successful routing result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Unique request id
    pub id: String,
    /// Name of the provider that produced the output
    pub provider: String,
    /// Provider output
    pub output: String,
    /// Usage metadata, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Advisory cost estimate (USD)
    pub cost_estimate: f64,
}

/// Error category reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Every attempted provider failed
    ProviderError,
    /// The request was rejected before routing
    InvalidRequest,
}

/// Structured error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error category
    pub error: ErrorKind,
    /// Human-readable message
    pub message: String,
}

impl ErrorEnvelope {
    /// `invalid_request` error
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            error: ErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    /// `provider_error` error
    #[must_use]
    pub fn provider_error(message: impl Into<String>) -> Self {
        Self {
            error: ErrorKind::ProviderError,
            message: message.into(),
        }
    }
}

// ============================================================================
// Route Error
// ============================================================================

/// Terminal routing failure
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The primary provider failed and declares no fallback
    #[error("provider {provider} failed with no fallback: {source}")]
    NoFallbackAvailable {
        /// Failed provider
        provider: String,
        /// Its error
        source: Error,
    },

    /// Both the primary and the fallback provider failed
    #[error("provider {primary} failed, fallback {fallback} also failed: {source}")]
    FallbackAlsoFailed {
        /// Primary provider
        primary: String,
        /// Fallback provider
        fallback: String,
        /// Primary provider's error, logged but not reported
        primary_error: Error,
        /// Fallback provider's error
        source: Error,
    },

    /// The router was shut down while the request was in flight
    #[error("provider {provider} cancelled")]
    Cancelled {
        /// Provider that was running
        provider: String,
    },
}

impl RouteError {
    /// Error that ended the request
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        match self {
            Self::NoFallbackAvailable { source, .. } | Self::FallbackAlsoFailed { source, .. } => {
                Some(source)
            }
            Self::Cancelled { .. } => None,
        }
    }

    /// Caller-facing envelope carrying the last error's message
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        match self.last_error() {
            Some(err) => ErrorEnvelope::provider_error(err.to_string()),
            None => ErrorEnvelope::provider_error(Error::Cancelled.to_string()),
        }
    }
}
