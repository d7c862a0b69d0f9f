//! Server initialization and run loop

use super::shutdown::shutdown_signal;
use super::{build_task_router, load_config};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use switchyard_llm::EnvCredentials;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Load configuration and serve until a shutdown signal arrives
pub async fn run() -> Result<()> {
    info!("Starting Switchyard v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let shutdown = CancellationToken::new();
    let router = build_task_router(&config, &EnvCredentials, shutdown.child_token())?;

    let app = crate::api::app(router);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("HTTP server error")?;

    info!("Switchyard shutdown complete");
    Ok(())
}
