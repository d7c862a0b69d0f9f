//! Server module for Switchyard
//!
//! # Module Structure
//!
//! - `config`: configuration structures and validation
//! - `loader`: configuration loading from files and environment
//! - `providers`: registry and router construction from configuration
//! - `shutdown`: signal handling
//! - `init`: server initialization and run loop

pub mod config;
mod init;
mod loader;
mod providers;
mod shutdown;

pub use init::run;
pub use loader::load_config;
pub use providers::{build_registry, build_task_router};
