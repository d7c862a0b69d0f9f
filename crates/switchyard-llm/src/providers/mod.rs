//! Providers - backends that fulfil an invocation
//!
//! # Module Structure
//!
//! - `deadline`: per-attempt deadline and cancellation
//! - `simulated`: latency-simulating provider used for tests and degraded roles
//! - `openai_compat`: OpenAI-compatible `/chat/completions` HTTP provider

mod deadline;
mod openai_compat;
mod simulated;

pub use deadline::Deadline;
pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
pub use simulated::SimulatedProvider;

use crate::error::Result;
use crate::request::{InvokeRequest, Role};
use serde::{Deserialize, Serialize};

/// Token usage reported by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    /// Completion tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    /// Total tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

/// Successful provider output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Generated text
    pub output: String,
    /// Usage metadata, when the provider reports it
    pub usage: Option<TokenUsage>,
}

/// Trait for invocation backends
///
/// Implementations hold only configuration fixed at construction time and
/// keep no per-request state, so one instance serves concurrent requests.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Stable provider name, reported in the response envelope
    fn name(&self) -> &str;

    /// Run the request, finishing before `deadline` or failing
    async fn invoke(&self, request: &InvokeRequest, deadline: &Deadline) -> Result<Invocation>;

    /// Role to try once if this provider fails
    fn fallback_role(&self) -> Option<Role> {
        None
    }

    /// Whether this provider only simulates a backend
    fn is_simulated(&self) -> bool {
        false
    }
}
