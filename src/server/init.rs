//! Server initialization and main run loop
//!
//! Contains the main `run()` function that starts all server components.

use super::background_tasks::start_retention_task;
use super::channel_starters::start_telegram_adapter;
use super::loader::load_config;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tally_core::UsageTracker;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Database file name under the data directory.
const USAGE_DB: &str = "usage.db";

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting Tally v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let tracker = Arc::new(open_tracker(&config).await?);

    let shutdown = CancellationToken::new();
    let mut channel_handles = Vec::new();

    if let Some(handle) = start_telegram_adapter(&tracker, &shutdown) {
        channel_handles.push(handle);
    }

    start_retention_task(&tracker, &config.retention, &shutdown);

    let app = Router::new()
        .merge(crate::api::health_routes())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await
        .context("HTTP server error")?;

    shutdown.cancel();

    info!("Waiting for channel adapters to finish...");
    let adapter_timeout = tokio::time::Duration::from_secs(5);
    for handle in channel_handles {
        match tokio::time::timeout(adapter_timeout, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Channel adapter task error: {}", e),
            Err(_) => warn!("Channel adapter shutdown timeout, aborting"),
        }
    }

    info!("Tally shutdown complete");
    Ok(())
}

/// Run one retention sweep and exit (the `sweep` subcommand)
pub async fn run_sweep() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let tracker = open_tracker(&config).await?;

    let today = chrono::Utc::now().date_naive();
    let deleted = tracker.sweep(today).await.context("Sweep failed")?;

    info!("Sweep complete: {} records deleted", deleted);
    Ok(())
}

/// Open the usage tracker under the configured data directory.
async fn open_tracker(config: &super::config::AppConfig) -> Result<UsageTracker> {
    let data_dir = config
        .data_dir
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    info!("Data directory: {}", data_dir.display());

    let tracker = UsageTracker::from_path(&data_dir.join(USAGE_DB))
        .await
        .context("Failed to open usage store")?
        .with_retention_days(config.retention.retention_days);

    Ok(tracker)
}
