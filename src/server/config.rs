//! Server configuration types

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use switchyard_llm::{CostSettings, DeadlinePolicy, RegistrySettings};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub cost: CostSettings,
    #[serde(default)]
    pub registry: RegistrySettings,
}

impl AppConfig {
    /// Reject settings the router cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.router.timeout_ms > 0, "router.timeout_ms must be greater than 0");

        let simulated = &self.registry.simulated;
        ensure!(
            simulated.min_latency_ms <= simulated.max_latency_ms,
            "registry.simulated.min_latency_ms ({}) exceeds max_latency_ms ({})",
            simulated.min_latency_ms,
            simulated.max_latency_ms
        );

        ensure!(
            self.cost.default_rate.is_finite() && self.cost.default_rate >= 0.0,
            "cost.default_rate must be a non-negative number"
        );
        for (provider, rate) in &self.cost.rates {
            ensure!(
                rate.is_finite() && *rate >= 0.0,
                "cost.rates.{provider} must be a non-negative number"
            );
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}

/// Router behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Per-attempt deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// How the fallback deadline relates to the primary's
    #[serde(default)]
    pub deadline_policy: DeadlinePolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            deadline_policy: DeadlinePolicy::default(),
        }
    }
}
