//! UsageStore — SQLite persistence for per-day usage counters.
//!
//! One table: `usage`, keyed by (user_id, date). Dates are stored as
//! ISO 8601 text (`YYYY-MM-DD`) so the date-range delete can compare
//! lexicographically.

use crate::error::{Error, Result};
use crate::types::UsageRecord;
use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

/// SQLite-backed counter store.
#[derive(Clone)]
pub struct UsageStore {
    pool: SqlitePool,
}

impl UsageStore {
    /// Open (or create) a usage store at the given path.
    pub async fn from_path(db_path: &std::path::Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(format!("mkdir: {e}")))?;
        }
        let url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Enable WAL for read/write concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("Usage store initialized at {}", db_path.display());
        Ok(store)
    }

    /// In-memory store (for tests).
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.run_migrations().await?;
        debug!("In-memory usage store initialized");
        Ok(store)
    }

    // ── Migrations ──────────────────────────────────────────────

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS usage (
                user_id INTEGER NOT NULL,
                date    TEXT    NOT NULL,
                count   INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, date)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_usage_date ON usage(date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Point operations ────────────────────────────────────────

    /// Add 1 to the user's counter for `date`, creating the record with
    /// count 1 if absent. Returns the resulting count.
    ///
    /// Upsert and increment are a single statement, so concurrent calls
    /// for the same (user, date) never lose updates.
    pub async fn increment(&self, user_id: i64, date: NaiveDate) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO usage (user_id, date, count)
             VALUES (?1, ?2, 1)
             ON CONFLICT(user_id, date) DO UPDATE SET
                count = count + 1
             RETURNING count",
        )
        .bind(user_id)
        .bind(date.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("count")?)
    }

    /// Subtract 1 from the user's counter for `date` if a record exists.
    ///
    /// Returns whether a record was modified. Never creates a record and
    /// does not floor at zero.
    pub async fn decrement(&self, user_id: i64, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE usage SET count = count - 1
             WHERE user_id = ?1 AND date = ?2",
        )
        .bind(user_id)
        .bind(date.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The stored count for (user, date), or 0 when no record exists.
    pub async fn get_count(&self, user_id: i64, date: NaiveDate) -> Result<i64> {
        let row = sqlx::query(
            "SELECT count FROM usage WHERE user_id = ?1 AND date = ?2",
        )
        .bind(user_id)
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.try_get("count")?),
            None => Ok(0),
        }
    }

    // ── Bulk deletes ────────────────────────────────────────────

    /// Remove every record for the user, regardless of date.
    /// Returns the number of records deleted.
    pub async fn delete_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM usage WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove every record (any user) dated strictly before `cutoff`.
    /// Returns the number of records deleted.
    pub async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64> {
        let result = sqlx::query("DELETE FROM usage WHERE date < ?1")
            .bind(cutoff.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ── Diagnostics ─────────────────────────────────────────────

    /// All records for a user, ordered by date.
    pub async fn records_for_user(&self, user_id: i64) -> Result<Vec<UsageRecord>> {
        let rows = sqlx::query(
            "SELECT user_id, date, count FROM usage
             WHERE user_id = ?1 ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Total number of records stored (all users).
    pub async fn record_count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM usage")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get::<i64, _>("cnt")? as u64)
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<UsageRecord> {
        let date_str: String = row.try_get("date")?;
        Ok(UsageRecord {
            user_id: row.try_get("user_id")?,
            date: date_str
                .parse()
                .map_err(|e| Error::Internal(format!("bad date in store: {e}")))?,
            count: row.try_get("count")?,
        })
    }
}
