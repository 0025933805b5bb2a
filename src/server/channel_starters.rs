//! Channel adapter startup functions
//!
//! Contains the function to start the Telegram adapter.

use std::sync::Arc;
use tally_channels::{TelegramAdapter, TelegramConfig};
use tally_core::UsageTracker;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Start the Telegram adapter
pub fn start_telegram_adapter(
    tracker: &Arc<UsageTracker>,
    shutdown: &CancellationToken,
) -> Option<tokio::task::JoinHandle<()>> {
    match TelegramConfig::from_env() {
        Ok(telegram_config) => {
            let telegram_adapter = Arc::new(TelegramAdapter::new(telegram_config));
            let telegram_tracker = tracker.clone();
            let telegram_shutdown = shutdown.child_token();

            let handle = tokio::spawn(async move {
                tokio::select! {
                    result = telegram_adapter.run(telegram_tracker) => {
                        if let Err(e) = result {
                            error!("Telegram adapter error: {}", e);
                        }
                    }
                    _ = telegram_shutdown.cancelled() => {
                        info!("Telegram adapter shutting down...");
                    }
                }
            });

            info!("Telegram adapter started");
            Some(handle)
        }
        Err(e) => {
            warn!("Telegram adapter not started: {}", e);
            None
        }
    }
}
