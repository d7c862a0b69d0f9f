//! Router - classification, invocation and fallback
//!
//! # Module Structure
//!
//! - `types`: response/error envelopes, route errors, deadline policy
//! - `router_impl`: the `TaskRouter` itself

mod router_impl;
mod types;


pub use router_impl::{TaskRouter, DEFAULT_TIMEOUT};
pub use types::{DeadlinePolicy, ErrorEnvelope, ErrorKind, ResponseEnvelope, RouteError};
