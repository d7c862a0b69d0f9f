//! Provider registry
//!
//! Maps roles to provider instances. Built once at startup and shared
//! read-only across requests behind an `Arc`.

mod settings;

pub use settings::{ProviderSettings, RegistrySettings, SimulatedSettings};

use crate::error::Result;
use crate::providers::{OpenAiCompatConfig, OpenAiCompatProvider, Provider, SimulatedProvider};
use crate::request::{ImageBackend, Role};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Name of the premium general-chat provider
pub const PREMIUM_PROVIDER_NAME: &str = "openai";

/// Source of provider credentials
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource {
    /// Value of `key`, if set and non-empty
    fn get(&self, key: &str) -> Option<String>;
}

/// Credentials read from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Role-to-provider registry
pub struct Registry {
    providers: HashMap<Role, Arc<dyn Provider>>,
    default_image: ImageBackend,
    premium: Option<Arc<dyn Provider>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("roles", &self.list_roles())
            .field("default_image", &self.default_image)
            .field("premium", &self.premium.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ImageBackend::default())
    }
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new(default_image: ImageBackend) -> Self {
        Self {
            providers: HashMap::new(),
            default_image,
            premium: None,
        }
    }

    /// Register a provider for a role, replacing any previous one
    pub fn register(&mut self, role: Role, provider: Arc<dyn Provider>) {
        debug!(role = %role, provider = %provider.name(), "Registering provider");
        self.providers.insert(role, provider);
    }

    /// Set the premium general-chat provider
    #[must_use]
    pub fn with_premium(mut self, provider: Arc<dyn Provider>) -> Self {
        debug!(provider = %provider.name(), "Registering premium provider");
        self.premium = Some(provider);
        self
    }

    /// Provider registered for a role
    #[must_use]
    pub fn get(&self, role: Role) -> Option<Arc<dyn Provider>> {
        self.providers.get(&role).cloned()
    }

    /// Check if a role has a registered provider
    #[must_use]
    pub fn has_provider(&self, role: Role) -> bool {
        self.providers.contains_key(&role)
    }

    /// Registered roles, text roles first then image backends
    #[must_use]
    pub fn list_roles(&self) -> Vec<Role> {
        Role::TEXT
            .into_iter()
            .chain(ImageBackend::ALL.into_iter().map(Role::Image))
            .filter(|role| self.providers.contains_key(role))
            .collect()
    }

    /// Premium provider, if configured
    #[must_use]
    pub fn premium(&self) -> Option<Arc<dyn Provider>> {
        self.premium.clone()
    }

    /// Default image backend
    #[must_use]
    pub fn default_image(&self) -> ImageBackend {
        self.default_image
    }

    /// Provider for a role; never fails
    ///
    /// Unregistered text roles get a simulated provider named after the
    /// role. Unregistered image backends use the default backend, then a
    /// simulated provider named after the requested backend.
    #[must_use]
    pub fn resolve(&self, role: Role) -> Arc<dyn Provider> {
        if let Some(provider) = self.get(role) {
            return provider;
        }
        if let Role::Image(backend) = role {
            if let Some(provider) = self.get(Role::Image(self.default_image)) {
                debug!(requested = %backend, default = %self.default_image, "Image backend not registered, using default");
                return provider;
            }
        }
        debug!(role = %role, "No provider registered, using simulated provider");
        Arc::new(SimulatedProvider::new(role.as_str()))
    }

    /// Build a registry from settings
    ///
    /// Text roles with a configured and present credential get a live HTTP
    /// provider; all other roles, and every image backend, get a simulated
    /// provider. The premium provider is only registered when its
    /// credential is present.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be created.
    pub fn from_settings(
        settings: &RegistrySettings,
        credentials: &dyn CredentialSource,
    ) -> Result<Self> {
        let mut registry = Self::new(settings.default_image);

        for role in Role::TEXT {
            let live = match settings.providers.get(&role) {
                Some(provider_settings) => {
                    live_provider(role.as_str(), provider_settings, credentials)?
                }
                None => None,
            };

            match live {
                Some(provider) => {
                    info!(role = %role, "Registered live provider");
                    registry.register(role, Arc::new(provider));
                }
                None => {
                    info!(role = %role, "No credentials, using simulated provider");
                    registry.register(role, Arc::new(simulated(role, &settings.simulated)));
                }
            }
        }

        for backend in ImageBackend::ALL {
            let role = Role::Image(backend);
            registry.register(role, Arc::new(simulated(role, &settings.simulated)));
        }

        if let Some(premium_settings) = &settings.premium {
            match live_provider(PREMIUM_PROVIDER_NAME, premium_settings, credentials)? {
                Some(provider) => {
                    info!(provider = PREMIUM_PROVIDER_NAME, "Registered premium provider");
                    registry = registry.with_premium(Arc::new(provider));
                }
                None => debug!(
                    env = %premium_settings.api_key_env,
                    "Premium provider not configured"
                ),
            }
        }

        Ok(registry)
    }
}

fn live_provider(
    name: &str,
    settings: &ProviderSettings,
    credentials: &dyn CredentialSource,
) -> Result<Option<OpenAiCompatProvider>> {
    let Some(api_key) = credentials.get(&settings.api_key_env) else {
        return Ok(None);
    };

    let mut config = OpenAiCompatConfig::new(name, api_key);
    let base_url = settings.base_url.clone().or_else(|| {
        settings
            .base_url_env
            .as_deref()
            .and_then(|key| credentials.get(key))
    });
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(model) = &settings.model {
        config = config.with_model(model.clone());
    }
    // unset keeps the provider's own default of `claude`
    if let Some(fallback) = settings.fallback {
        config = config.with_fallback(fallback);
    }

    OpenAiCompatProvider::new(config).map(Some)
}

fn simulated(role: Role, settings: &SimulatedSettings) -> SimulatedProvider {
    let provider = SimulatedProvider::new(role.as_str()).with_latency(
        Duration::from_millis(settings.min_latency_ms),
        Duration::from_millis(settings.max_latency_ms),
    );
    match &settings.fail_marker {
        Some(marker) if settings.fail_roles.contains(&role) => provider.with_fail_marker(marker.clone()),
        _ => provider,
    }
}

#[cfg(test)]
mod tests;
