//! Switchyard LLM - task-based provider routing
//!
//! This crate provides the routing core for Switchyard:
//! - Request: the validated task request (task kind, input, options)
//! - Classify: fixed decision table mapping a request to a provider role
//! - Cost: advisory cost estimation for the provider actually used
//! - Providers: provider trait, simulated provider, OpenAI-compatible HTTP provider
//! - Registry: role-to-provider lookup and the environment-driven factory
//! - Router: classification, invocation under a deadline, single-hop fallback

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod cost;
pub mod error;
pub mod providers;
pub mod registry;
pub mod request;
pub mod router;
pub mod util;

pub use classify::{classify, classify_with_rule, Classification, Rule, LONG_CONTEXT_THRESHOLD};
pub use cost::{CostEstimator, CostSettings};
pub use error::{Error, Result};
pub use providers::{
    Deadline, Invocation, OpenAiCompatConfig, OpenAiCompatProvider, Provider, SimulatedProvider,
    TokenUsage,
};
pub use registry::{
    CredentialSource, EnvCredentials, ProviderSettings, Registry, RegistrySettings,
    SimulatedSettings,
};
pub use request::{ImageBackend, ImageOptions, InvokeOptions, InvokeRequest, Mode, Role, TaskKind};
pub use router::{
    DeadlinePolicy, ErrorEnvelope, ErrorKind, ResponseEnvelope, RouteError, TaskRouter,
    DEFAULT_TIMEOUT,
};
