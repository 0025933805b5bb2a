//! Core data types for the usage tracker.
//!
//! The store holds one **UsageRecord** per (user, calendar date) pair;
//! the report types are read models derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day's counter for one user — the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Telegram chat identifier (stable per conversation)
    pub user_id: i64,
    /// Calendar date the counter belongs to
    pub date: NaiveDate,
    /// Number of tracked events on that date. Not floored at zero:
    /// undoing past zero leaves the literal negative value.
    pub count: i64,
}

/// One entry of a weekly breakdown. Days with no record carry count 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    /// Calendar date
    pub date: NaiveDate,
    /// Count for that date (0 when no record exists)
    pub count: i64,
}

/// Seven-day breakdown ending at the anchor date, plus the window sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Exactly 7 entries in ascending date order
    pub days: Vec<DayCount>,
    /// Sum of all 7 per-day counts
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_record_serialization() {
        let record = UsageRecord {
            user_id: 42,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            count: 3,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: UsageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_weekly_report_serialization() {
        let report = WeeklyReport {
            days: vec![DayCount {
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                count: 2,
            }],
            total: 2,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("2025-06-01"));
        assert!(json.contains("\"total\":2"));
    }
}
