//! HTTP server initialization and runtime setup.
//!
//! Opens the storage backend, restores the index, spawns the delete worker
//! and drives the Axum server until a shutdown signal arrives.

use crate::application::services::{IdentityService, LinkService};
use crate::config::Config;
use crate::domain::delete_worker::run_delete_worker;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Time allowed for queued soft-deletes to reach the backend on shutdown.
const DELETE_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend selected by [`Config::backend`]
/// - Link index restored from the backend
/// - Background delete worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The backend cannot be opened or loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend_config = config.backend();
    let backend = backend_config
        .open()
        .await
        .with_context(|| format!("Failed to open {} storage", backend_config.kind()))?;

    let (delete_tx, delete_rx) = mpsc::channel(config.delete_queue_capacity);

    let links = LinkService::open(backend.clone(), delete_tx)
        .await
        .context("Failed to load links from storage")?;

    let worker = tokio::spawn(run_delete_worker(
        delete_rx,
        backend,
        config.delete_worker_concurrency,
    ));
    tracing::info!("Delete worker started");

    let identity = IdentityService::new(config.cookie_secret.clone());
    let state = AppState::new(Arc::new(links), Arc::new(identity), config.base_url.clone());

    let app = app_router(state);

    let listener = TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last delete sender, so the worker now drains.
    match timeout(DELETE_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => tracing::info!("Delete queue drained"),
        Ok(Err(e)) => tracing::error!("Delete worker failed: {}", e),
        Err(_) => tracing::warn!("Delete queue not drained within {:?}", DELETE_DRAIN_TIMEOUT),
    }

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}
