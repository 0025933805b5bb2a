//! Window reports — day/week/30-day sums over the counter store.
//!
//! Windows are anchored to an explicitly passed `today` so the functions
//! stay pure over the store and testable without clock mocking. Window
//! sizes are small and bounded, so each report is a handful of point
//! reads rather than a maintained rollup.

use crate::error::Result;
use crate::store::UsageStore;
use crate::types::{DayCount, WeeklyReport};
use chrono::{Days, NaiveDate};

/// Days covered by the weekly breakdown.
pub const WEEK_WINDOW_DAYS: u64 = 7;

/// Days covered by the monthly total.
pub const MONTH_WINDOW_DAYS: u64 = 30;

/// The user's count for `today`.
pub async fn daily_total(store: &UsageStore, user_id: i64, today: NaiveDate) -> Result<i64> {
    store.get_count(user_id, today).await
}

/// Per-day breakdown and sum over the 7 dates ending at `today`.
///
/// Every date in the window is listed, in chronological order; days
/// without a record carry count 0. A failed read for any day fails the
/// whole report rather than being treated as zero.
pub async fn weekly_report(
    store: &UsageStore,
    user_id: i64,
    today: NaiveDate,
) -> Result<WeeklyReport> {
    let mut days = Vec::with_capacity(WEEK_WINDOW_DAYS as usize);
    let mut total = 0;

    for offset in (0..WEEK_WINDOW_DAYS).rev() {
        let date = today - Days::new(offset);
        let count = store.get_count(user_id, date).await?;
        total += count;
        days.push(DayCount { date, count });
    }

    Ok(WeeklyReport { days, total })
}

/// Sum over the 30 dates ending at `today`.
pub async fn monthly_total(store: &UsageStore, user_id: i64, today: NaiveDate) -> Result<i64> {
    let mut total = 0;

    for offset in 0..MONTH_WINDOW_DAYS {
        let date = today - Days::new(offset);
        total += store.get_count(user_id, date).await?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> UsageStore {
        UsageStore::in_memory().await.unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    async fn bump(store: &UsageStore, user: i64, date: NaiveDate, times: i64) {
        for _ in 0..times {
            store.increment(user, date).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_daily_total_matches_point_read() {
        let store = test_store().await;
        bump(&store, 1, day(10), 4).await;

        assert_eq!(daily_total(&store, 1, day(10)).await.unwrap(), 4);
        assert_eq!(daily_total(&store, 1, day(11)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_weekly_report_all_empty() {
        let store = test_store().await;
        let report = weekly_report(&store, 1, day(10)).await.unwrap();

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.total, 0);
        assert!(report.days.iter().all(|d| d.count == 0));
    }

    #[tokio::test]
    async fn test_weekly_report_order_and_bounds() {
        let store = test_store().await;
        let report = weekly_report(&store, 1, day(10)).await.unwrap();

        assert_eq!(report.days[0].date, day(4));
        assert_eq!(report.days[6].date, day(10));
        for pair in report.days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[tokio::test]
    async fn test_weekly_report_sparse_history() {
        let store = test_store().await;
        // D-6: 1, D-3: 2, D: 5 with D = June 10
        bump(&store, 1, day(4), 1).await;
        bump(&store, 1, day(7), 2).await;
        bump(&store, 1, day(10), 5).await;

        let report = weekly_report(&store, 1, day(10)).await.unwrap();
        assert_eq!(report.total, 8);
        assert_eq!(report.days.iter().filter(|d| d.count == 0).count(), 4);
        assert_eq!(
            report.days.iter().map(|d| d.count).sum::<i64>(),
            report.total
        );
    }

    #[tokio::test]
    async fn test_weekly_report_all_populated() {
        let store = test_store().await;
        for d in 4..=10 {
            bump(&store, 1, day(d), 1).await;
        }

        let report = weekly_report(&store, 1, day(10)).await.unwrap();
        assert_eq!(report.total, 7);
        assert!(report.days.iter().all(|d| d.count == 1));
    }

    #[tokio::test]
    async fn test_weekly_report_excludes_outside_window() {
        let store = test_store().await;
        bump(&store, 1, day(3), 9).await; // one day before the window
        bump(&store, 1, day(11), 9).await; // one day after the anchor

        let report = weekly_report(&store, 1, day(10)).await.unwrap();
        assert_eq!(report.total, 0);
    }

    #[tokio::test]
    async fn test_weekly_report_ignores_other_users() {
        let store = test_store().await;
        bump(&store, 2, day(10), 3).await;

        let report = weekly_report(&store, 1, day(10)).await.unwrap();
        assert_eq!(report.total, 0);
    }

    #[tokio::test]
    async fn test_monthly_total_window_bounds() {
        let store = test_store().await;
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        // Oldest date still inside: today - 29
        bump(&store, 1, today - Days::new(29), 2).await;
        // One day too old
        bump(&store, 1, today - Days::new(30), 9).await;
        bump(&store, 1, today, 3).await;

        assert_eq!(monthly_total(&store, 1, today).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_monthly_total_spans_month_boundary() {
        let store = test_store().await;
        let today = day(10);
        bump(&store, 1, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(), 4).await;
        bump(&store, 1, today, 1).await;

        assert_eq!(monthly_total(&store, 1, today).await.unwrap(), 5);
    }
}
