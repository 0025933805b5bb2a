//! Tally Core — Daily Usage Counter Store
//!
//! Persists one counter per (user, calendar date) pair in SQLite and
//! computes fixed-window sums over it.
//!
//! # Architecture
//!
//! ```text
//! Commands ──► UsageTracker
//!                  │
//!          ┌───────┼────────────┐
//!     UsageStore  report    RetentionSweeper
//!       (SQLite)  (windows)  (30-day horizon)
//! ```
//!
//! Every operation is a single-step transaction against the one table;
//! "today" is always passed in explicitly so nothing below the call
//! boundary reads the clock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod report;
pub mod retention;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use retention::{RetentionSweeper, DEFAULT_RETENTION_DAYS};
pub use store::UsageStore;
pub use types::{DayCount, UsageRecord, WeeklyReport};

use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

/// High-level facade combining the store, window reports, and sweeper.
///
/// This is the API the channel adapter and server talk to; each method
/// maps 1:1 to a chat command or the daily eviction trigger.
#[derive(Clone)]
pub struct UsageTracker {
    store: UsageStore,
    sweeper: RetentionSweeper,
}

impl UsageTracker {
    /// Create a tracker backed by an SQLite file.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let store = UsageStore::from_path(path).await?;
        let sweeper = RetentionSweeper::new(store.clone());
        Ok(Self { store, sweeper })
    }

    /// Create an in-memory tracker (useful for tests).
    pub async fn in_memory() -> Result<Self> {
        let store = UsageStore::in_memory().await?;
        let sweeper = RetentionSweeper::new(store.clone());
        Ok(Self { store, sweeper })
    }

    /// Override the retention horizon (default 30 days).
    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.sweeper = self.sweeper.with_retention_days(days);
        self
    }

    /// Record one event for the user on `today`. Returns the day's count.
    pub async fn track(&self, user_id: i64, today: NaiveDate) -> Result<i64> {
        let count = self.store.increment(user_id, today).await?;
        debug!(user_id, %today, count, "Tracked event");
        Ok(count)
    }

    /// Undo the most recent event for the user on `today`.
    ///
    /// Returns whether anything was undone; with no record for the day
    /// this is a no-op.
    pub async fn undo(&self, user_id: i64, today: NaiveDate) -> Result<bool> {
        self.store.decrement(user_id, today).await
    }

    /// Purge the user's entire history. Returns records deleted.
    pub async fn reset(&self, user_id: i64) -> Result<u64> {
        let deleted = self.store.delete_all_for_user(user_id).await?;
        debug!(user_id, deleted, "Reset user history");
        Ok(deleted)
    }

    /// The user's count for `today`.
    pub async fn today_total(&self, user_id: i64, today: NaiveDate) -> Result<i64> {
        report::daily_total(&self.store, user_id, today).await
    }

    /// Per-day breakdown and sum over the 7 days ending at `today`.
    pub async fn weekly_report(&self, user_id: i64, today: NaiveDate) -> Result<WeeklyReport> {
        report::weekly_report(&self.store, user_id, today).await
    }

    /// Sum over the 30 days ending at `today`.
    pub async fn monthly_total(&self, user_id: i64, today: NaiveDate) -> Result<i64> {
        report::monthly_total(&self.store, user_id, today).await
    }

    /// Evict records older than the retention horizon. Returns records
    /// deleted.
    pub async fn sweep(&self, today: NaiveDate) -> Result<u64> {
        self.sweeper.sweep(today).await
    }

    /// Total number of records stored (all users).
    pub async fn record_count(&self) -> Result<u64> {
        self.store.record_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_track_undo_reset_flow() {
        let tracker = UsageTracker::in_memory().await.unwrap();

        assert_eq!(tracker.track(1, day(10)).await.unwrap(), 1);
        assert_eq!(tracker.track(1, day(10)).await.unwrap(), 2);
        assert_eq!(tracker.today_total(1, day(10)).await.unwrap(), 2);

        assert!(tracker.undo(1, day(10)).await.unwrap());
        assert_eq!(tracker.today_total(1, day(10)).await.unwrap(), 1);

        assert_eq!(tracker.reset(1).await.unwrap(), 1);
        assert_eq!(tracker.today_total(1, day(10)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_undo_without_history() {
        let tracker = UsageTracker::in_memory().await.unwrap();
        assert!(!tracker.undo(1, day(10)).await.unwrap());
    }

    #[tokio::test]
    async fn test_windows_through_facade() {
        let tracker = UsageTracker::in_memory().await.unwrap();
        tracker.track(1, day(4)).await.unwrap();
        tracker.track(1, day(10)).await.unwrap();

        let weekly = tracker.weekly_report(1, day(10)).await.unwrap();
        assert_eq!(weekly.total, 2);
        assert_eq!(weekly.days.len(), 7);

        assert_eq!(tracker.monthly_total(1, day(10)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sweep_through_facade() {
        let tracker = UsageTracker::in_memory().await.unwrap().with_retention_days(7);
        let today = day(20);
        tracker.track(1, today - Days::new(10)).await.unwrap();
        tracker.track(1, today).await.unwrap();

        assert_eq!(tracker.sweep(today).await.unwrap(), 1);
        assert_eq!(tracker.record_count().await.unwrap(), 1);
    }
}
