//! Task router implementation

use super::types::{DeadlinePolicy, ResponseEnvelope, RouteError};
use crate::classify::{classify_with_rule, Rule};
use crate::cost::CostEstimator;
use crate::error::Error;
use crate::providers::{Deadline, Invocation, Provider};
use crate::registry::Registry;
use crate::request::InvokeRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Routes requests to providers with a single fallback hop
///
/// Holds no per-request state; one router serves concurrent requests.
#[derive(Debug, Clone)]
pub struct TaskRouter {
    registry: Arc<Registry>,
    timeout: Duration,
    policy: DeadlinePolicy,
    cost: CostEstimator,
    shutdown: CancellationToken,
}

impl TaskRouter {
    /// Create a router over a registry with default settings
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            timeout: DEFAULT_TIMEOUT,
            policy: DeadlinePolicy::default(),
            cost: CostEstimator::default(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the deadline policy
    #[must_use]
    pub fn with_deadline_policy(mut self, policy: DeadlinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the cost estimator
    #[must_use]
    pub fn with_cost_estimator(mut self, cost: CostEstimator) -> Self {
        self.cost = cost;
        self
    }

    /// Tie every request to `token`; cancelling it aborts in-flight calls
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Provider registry
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Per-attempt timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deadline policy
    #[must_use]
    pub fn deadline_policy(&self) -> DeadlinePolicy {
        self.policy
    }

    /// Route a validated request
    ///
    /// Invokes the classified provider, and on failure its declared
    /// fallback exactly once. The fallback starts only after the primary
    /// has failed.
    ///
    /// # Errors
    /// Returns a [`RouteError`] when no attempted provider succeeded.
    pub async fn route(&self, request: &InvokeRequest) -> Result<ResponseEnvelope, RouteError> {
        let request_id = Uuid::new_v4().to_string();
        info!(request_id = %request_id, task = %request.task, tokens = request.tokens(), "invoke:start");

        let primary = self.select(&request_id, request);
        let cancel = self.shutdown.child_token();
        let deadline = Deadline::new(self.timeout, cancel.clone());

        let primary_error = match primary.invoke(request, &deadline).await {
            Ok(invocation) => {
                info!(request_id = %request_id, provider = %primary.name(), "invoke:success");
                return Ok(self.envelope(request_id, request, primary.as_ref(), invocation));
            }
            Err(err) => {
                warn!(request_id = %request_id, provider = %primary.name(), error = %err, "invoke:error");
                err
            }
        };

        if matches!(primary_error, Error::Cancelled) {
            return Err(RouteError::Cancelled {
                provider: primary.name().to_string(),
            });
        }

        let Some(fallback_role) = primary.fallback_role() else {
            warn!(request_id = %request_id, provider = %primary.name(), "invoke:no_fallback");
            return Err(RouteError::NoFallbackAvailable {
                provider: primary.name().to_string(),
                source: primary_error,
            });
        };

        let fallback = self.registry.resolve(fallback_role);
        info!(
            request_id = %request_id,
            from = %primary.name(),
            role = %fallback_role,
            to = %fallback.name(),
            "invoke:fallback"
        );

        let fallback_deadline = match self.policy {
            DeadlinePolicy::PerHop => Deadline::new(self.timeout, cancel),
            DeadlinePolicy::Shared => deadline.remainder(),
        };

        match fallback.invoke(request, &fallback_deadline).await {
            Ok(invocation) => {
                info!(request_id = %request_id, provider = %fallback.name(), "invoke:fallback_success");
                Ok(self.envelope(request_id, request, fallback.as_ref(), invocation))
            }
            Err(Error::Cancelled) => {
                warn!(request_id = %request_id, provider = %fallback.name(), "invoke:fallback_error");
                Err(RouteError::Cancelled {
                    provider: fallback.name().to_string(),
                })
            }
            Err(err) => {
                warn!(request_id = %request_id, provider = %fallback.name(), error = %err, "invoke:fallback_error");
                Err(RouteError::FallbackAlsoFailed {
                    primary: primary.name().to_string(),
                    fallback: fallback.name().to_string(),
                    primary_error,
                    source: err,
                })
            }
        }
    }

    /// Classify and pick the primary provider
    fn select(&self, request_id: &str, request: &InvokeRequest) -> Arc<dyn Provider> {
        let classification = classify_with_rule(request);
        let mut provider = self.registry.resolve(classification.role);

        if classification.rule == Rule::GeneralChat {
            if let Some(premium) = self.registry.premium() {
                info!(request_id = %request_id, from = %provider.name(), to = %premium.name(), "invoke:premium_override");
                provider = premium;
            }
        }

        info!(
            request_id = %request_id,
            role = %classification.role,
            rule = ?classification.rule,
            provider = %provider.name(),
            "invoke:chosen_provider"
        );
        provider
    }

    fn envelope(
        &self,
        id: String,
        request: &InvokeRequest,
        provider: &dyn Provider,
        invocation: Invocation,
    ) -> ResponseEnvelope {
        ResponseEnvelope {
            id,
            provider: provider.name().to_string(),
            output: invocation.output,
            usage: invocation.usage,
            cost_estimate: self.cost.estimate(request, provider.name()),
        }
    }
}
