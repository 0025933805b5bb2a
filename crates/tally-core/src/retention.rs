//! Retention sweeping — bulk eviction of records past the horizon.

use crate::error::Result;
use crate::store::UsageStore;
use chrono::{Days, NaiveDate};
use tracing::info;

/// Age in days beyond which records are eligible for deletion.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Deletes records older than the retention horizon.
///
/// Stateless and idempotent; carries no timing logic. The once-per-day
/// trigger lives with the caller.
#[derive(Clone)]
pub struct RetentionSweeper {
    store: UsageStore,
    retention_days: u32,
}

impl RetentionSweeper {
    /// Create a sweeper with the default 30-day horizon.
    #[must_use]
    pub fn new(store: UsageStore) -> Self {
        Self {
            store,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    /// Override the retention horizon.
    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    /// The configured horizon in days.
    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Delete every record dated strictly before `today - retention_days`.
    ///
    /// A record dated exactly at the horizon survives. Returns the number
    /// of records deleted.
    pub async fn sweep(&self, today: NaiveDate) -> Result<u64> {
        let cutoff = today - Days::new(u64::from(self.retention_days));
        let deleted = self.store.delete_older_than(cutoff).await?;
        if deleted > 0 {
            info!(%cutoff, deleted, "Retention sweep evicted old records");
        }
        Ok(deleted)
    }
}
