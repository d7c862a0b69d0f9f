//! Web API module for Switchyard
//!
//! - `GET /health`: readiness
//! - `POST /invoke`: route a task request

pub mod health;
pub mod invoke;

use axum::{Extension, Router};
use std::sync::Arc;
use switchyard_llm::TaskRouter;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use health::health_routes;
pub use invoke::invoke_routes;

/// Build the HTTP application around a task router
pub fn app(router: Arc<TaskRouter>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(invoke_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(Extension(router)),
        )
}
