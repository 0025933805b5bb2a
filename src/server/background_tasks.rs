//! Background task startup functions
//!
//! Contains the daily retention sweep trigger. The sweeper itself lives
//! in tally-core and carries no timing logic; this task is the
//! scheduler that invokes it once per interval.

use super::config::RetentionAppConfig;
use std::sync::Arc;
use tally_core::UsageTracker;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Start the retention sweep background task
pub fn start_retention_task(
    tracker: &Arc<UsageTracker>,
    retention: &RetentionAppConfig,
    shutdown: &CancellationToken,
) {
    if !retention.enabled {
        info!("Retention sweeper disabled by configuration");
        return;
    }

    let sweep_tracker = tracker.clone();
    let sweep_shutdown = shutdown.child_token();
    let interval = tokio::time::Duration::from_secs(retention.sweep_interval_secs);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    // "today" is fixed once per tick, in UTC
                    let today = chrono::Utc::now().date_naive();
                    match sweep_tracker.sweep(today).await {
                        Ok(deleted) => {
                            if deleted > 0 {
                                info!("Retention sweep: deleted {} old records", deleted);
                            }
                        }
                        Err(e) => {
                            warn!("Retention sweep failed: {}", e);
                        }
                    }
                }
                _ = sweep_shutdown.cancelled() => {
                    info!("Retention task shutting down");
                    break;
                }
            }
        }
    });
    info!(
        "Retention task started (interval: {}s, horizon: {} days)",
        retention.sweep_interval_secs, retention.retention_days
    );
}
