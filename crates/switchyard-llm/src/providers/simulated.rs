//! Simulated provider
//!
//! Echoes the input after a random delay. Used when a role has no
//! credentials configured and as a deterministic stand-in in tests.

use super::{Deadline, Invocation, Provider, TokenUsage};
use crate::error::{Error, Result};
use crate::request::{InvokeRequest, Role};
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Default lower bound of simulated latency
pub const DEFAULT_MIN_LATENCY: Duration = Duration::from_millis(200);
/// Default upper bound of simulated latency
pub const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(400);
/// Margin kept between the simulated delay and the deadline
const DEADLINE_MARGIN: Duration = Duration::from_millis(50);
/// Prompt tokens reported when the request carries no estimate
const DEFAULT_REPORTED_TOKENS: u64 = 10;

/// Default fallback for a role name: `gpt5` and `claude` back each other up
#[must_use]
pub fn default_fallback(name: &str) -> Option<Role> {
    match name {
        "gpt5" => Some(Role::Claude),
        "claude" => Some(Role::Gpt5),
        _ => None,
    }
}

/// Latency-simulating provider
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    name: String,
    min_latency: Duration,
    max_latency: Duration,
    fail_marker: Option<String>,
    fallback: Option<Role>,
}

impl SimulatedProvider {
    /// Simulated provider with default latency and the default fallback mapping
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let fallback = default_fallback(&name);
        Self {
            name,
            min_latency: DEFAULT_MIN_LATENCY,
            max_latency: DEFAULT_MAX_LATENCY,
            fail_marker: None,
            fallback,
        }
    }

    /// Set the latency range
    #[must_use]
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.min_latency = min.min(max);
        self.max_latency = max.max(min);
        self
    }

    /// Fail every request whose input contains `marker`
    #[must_use]
    pub fn with_fail_marker(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    /// Override the declared fallback role
    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<Role>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Pick a delay inside the latency range that ends before the deadline
    fn pick_delay(&self, deadline: &Deadline) -> Duration {
        let min = u64::try_from(self.min_latency.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_latency.as_millis()).unwrap_or(u64::MAX);
        let sampled = Duration::from_millis(rand::thread_rng().gen_range(min..=max));
        sampled.min(deadline.remaining().saturating_sub(DEADLINE_MARGIN))
    }
}

#[async_trait::async_trait]
impl Provider for SimulatedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, request: &InvokeRequest, deadline: &Deadline) -> Result<Invocation> {
        let delay = self.pick_delay(deadline);
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!(provider = %self.name, delay_ms, "Simulating provider latency");

        deadline
            .run(async {
                tokio::time::sleep(delay).await;
                Ok(())
            })
            .await?;

        if let Some(marker) = &self.fail_marker {
            if request.input.contains(marker.as_str()) {
                return Err(Error::Provider(format!(
                    "simulated failure in {}",
                    self.name
                )));
            }
        }

        let prompt_tokens = request.declared_tokens().unwrap_or(DEFAULT_REPORTED_TOKENS);
        Ok(Invocation {
            output: format!("mock({}): {}", self.name, request.input),
            usage: Some(TokenUsage {
                prompt_tokens: Some(prompt_tokens),
                completion_tokens: None,
                total_tokens: Some(prompt_tokens),
            }),
        })
    }

    fn fallback_role(&self) -> Option<Role> {
        self.fallback
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
