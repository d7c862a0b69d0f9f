//! Provider resolution
//!
//! Builds the provider registry and the task router from configuration.

use super::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use switchyard_llm::{CostEstimator, CredentialSource, Registry, TaskRouter};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Build the registry, using live providers wherever credentials are present
pub fn build_registry(config: &AppConfig, credentials: &dyn CredentialSource) -> Result<Registry> {
    let registry = Registry::from_settings(&config.registry, credentials)
        .context("Failed to build provider registry")?;

    let live = registry
        .list_roles()
        .into_iter()
        .filter(|role| !registry.resolve(*role).is_simulated())
        .count();
    info!(
        roles = registry.list_roles().len(),
        live,
        premium = registry.premium().is_some(),
        "Provider registry ready"
    );
    Ok(registry)
}

/// Build the task router; `shutdown` aborts in-flight invocations when cancelled
pub fn build_task_router(
    config: &AppConfig,
    credentials: &dyn CredentialSource,
    shutdown: CancellationToken,
) -> Result<Arc<TaskRouter>> {
    let registry = build_registry(config, credentials)?;
    let router = TaskRouter::new(Arc::new(registry))
        .with_timeout(Duration::from_millis(config.router.timeout_ms))
        .with_deadline_policy(config.router.deadline_policy)
        .with_cost_estimator(CostEstimator::from_settings(&config.cost))
        .with_cancellation(shutdown);

    info!(
        timeout_ms = config.router.timeout_ms,
        deadline_policy = %config.router.deadline_policy,
        "Task router ready"
    );
    Ok(Arc::new(router))
}
