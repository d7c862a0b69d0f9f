//! Cost estimation
//!
//! Advisory, per-token cost estimates reported alongside each response.
//! Estimates are computed after the fact for the provider that actually
//! served the request and never feed back into routing.

use crate::request::InvokeRequest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Constants
// ============================================================================

/// gpt5 cost per token (USD)
pub const GPT5_RATE: f64 = 0.0006;
/// claude cost per token (USD)
pub const CLAUDE_RATE: f64 = 0.0005;
/// gemini cost per token (USD)
pub const GEMINI_RATE: f64 = 0.0004;
/// deepseek cost per token (USD)
pub const DEEPSEEK_RATE: f64 = 0.0002;
/// Cost per token for providers without an explicit rate
pub const DEFAULT_RATE: f64 = 0.0005;

/// Decimal places kept in an estimate
const PRECISION: i32 = 6;

fn default_rate() -> f64 {
    DEFAULT_RATE
}

fn default_rates() -> HashMap<String, f64> {
    HashMap::from([
        ("gpt5".to_string(), GPT5_RATE),
        ("claude".to_string(), CLAUDE_RATE),
        ("gemini".to_string(), GEMINI_RATE),
        ("deepseek".to_string(), DEEPSEEK_RATE),
    ])
}

/// Per-provider rates loaded from `[cost]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSettings {
    /// Rate for providers not listed in `rates`
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    /// Rate overrides keyed by provider name
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE,
            rates: HashMap::new(),
        }
    }
}

/// Pure per-token cost estimator
#[derive(Debug, Clone)]
pub struct CostEstimator {
    rates: HashMap<String, f64>,
    default_rate: f64,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self {
            rates: default_rates(),
            default_rate: DEFAULT_RATE,
        }
    }
}

impl CostEstimator {
    /// Build an estimator from settings; configured rates override the built-in table
    #[must_use]
    pub fn from_settings(settings: &CostSettings) -> Self {
        let mut rates = default_rates();
        rates.extend(settings.rates.clone());
        Self {
            rates,
            default_rate: settings.default_rate,
        }
    }

    /// Rate applied to a provider
    #[must_use]
    pub fn rate_for(&self, provider: &str) -> f64 {
        self.rates
            .get(provider)
            .copied()
            .unwrap_or(self.default_rate)
            .max(0.0)
    }

    /// Estimate the cost of serving `request` with `provider`
    ///
    /// Missing token counts are treated as zero usage.
    #[must_use]
    pub fn estimate(&self, request: &InvokeRequest, provider: &str) -> f64 {
        let tokens = request.tokens() as f64;
        let raw = tokens * self.rate_for(provider);
        let scale = 10f64.powi(PRECISION);
        let rounded = (raw * scale).round() / scale;
        if rounded.is_finite() {
            rounded.max(0.0)
        } else {
            0.0
        }
    }
}
