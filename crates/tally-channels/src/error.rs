//! Error types for tally-channels

use thiserror::Error;

/// Channel error type
#[derive(Debug, Error)]
pub enum Error {
    /// Telegram error
    #[error("telegram error: {0}")]
    Telegram(String),

    /// Propagated usage-tracker failure
    #[error("tracker error: {0}")]
    Tracker(#[from] tally_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
