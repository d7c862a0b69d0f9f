//! Registry settings loaded from `[registry]`

use crate::request::{ImageBackend, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_min_latency_ms() -> u64 {
    200
}

fn default_max_latency_ms() -> u64 {
    400
}

fn default_fail_marker() -> Option<String> {
    Some("[fail]".to_string())
}

fn default_fail_roles() -> Vec<Role> {
    vec![Role::Gpt5]
}

/// Simulated provider behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedSettings {
    /// Lower bound of simulated latency (ms)
    #[serde(default = "default_min_latency_ms")]
    pub min_latency_ms: u64,
    /// Upper bound of simulated latency (ms)
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,
    /// Inputs containing this marker fail on `fail_roles`
    #[serde(default = "default_fail_marker")]
    pub fail_marker: Option<String>,
    /// Roles whose simulated provider honours `fail_marker`
    #[serde(default = "default_fail_roles")]
    pub fail_roles: Vec<Role>,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            min_latency_ms: default_min_latency_ms(),
            max_latency_ms: default_max_latency_ms(),
            fail_marker: default_fail_marker(),
            fail_roles: default_fail_roles(),
        }
    }
}

/// Live HTTP provider settings for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Base URL; takes precedence over `base_url_env`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the base URL
    #[serde(default)]
    pub base_url_env: Option<String>,
    /// Model name
    #[serde(default)]
    pub model: Option<String>,
    /// Fallback role override
    #[serde(default)]
    pub fallback: Option<Role>,
}

impl ProviderSettings {
    /// Settings reading the key from `api_key_env`, everything else defaulted
    #[must_use]
    pub fn from_env_var(api_key_env: impl Into<String>) -> Self {
        Self {
            api_key_env: api_key_env.into(),
            base_url: None,
            base_url_env: None,
            model: None,
            fallback: None,
        }
    }
}

/// Registry factory settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Image backend used when the requested one is not registered
    #[serde(default)]
    pub default_image: ImageBackend,
    /// Simulated provider behaviour
    #[serde(default)]
    pub simulated: SimulatedSettings,
    /// Live providers keyed by role
    #[serde(default)]
    pub providers: HashMap<Role, ProviderSettings>,
    /// Premium general-chat provider
    #[serde(default)]
    pub premium: Option<ProviderSettings>,
}
