//! Reply formatting for chat commands.
//!
//! Pure functions from tracker results to the text sent back to the
//! user, kept out of the adapter so they can be unit-tested without a
//! bot.

use tally_core::WeeklyReport;

/// Reply to `/track`: the day's running count after the increment.
pub fn track_reply(count: i64) -> String {
    format!("Tracked. Count for today: {count}")
}

/// Reply to `/today`.
pub fn daily_reply(count: i64) -> String {
    format!("Today's count: {count}")
}

/// Reply to `/week`: one `date: count` line per day plus the total.
pub fn weekly_reply(report: &WeeklyReport) -> String {
    let mut lines = vec!["Last 7 days:".to_string()];
    for day in &report.days {
        lines.push(format!("{}: {}", day.date, day.count));
    }
    lines.push(format!("Total: {}", report.total));
    lines.join("\n")
}

/// Reply to `/month`.
pub fn monthly_reply(total: i64) -> String {
    format!("Last 30 days: {total}")
}

/// Reply to `/undo`.
pub fn undo_reply(modified: bool) -> String {
    if modified {
        "Undone. Last entry removed.".to_string()
    } else {
        "Nothing to undo for today.".to_string()
    }
}

/// Reply to `/reset`.
pub fn reset_reply(deleted: u64) -> String {
    if deleted > 0 {
        format!("History cleared ({deleted} records removed).")
    } else {
        "No history to clear.".to_string()
    }
}

/// Reply to `/start`, `/help`, and unknown slash commands.
pub fn help_text() -> &'static str {
    "Tally keeps a daily counter for you.\n\
     /track — record one event (alias: /t)\n\
     /today — today's count\n\
     /week — 7-day breakdown\n\
     /month — 30-day total\n\
     /undo — remove the most recent entry\n\
     /reset — delete your entire history"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::DayCount;

    fn sample_report() -> WeeklyReport {
        let start = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let days = (0u64..7)
            .map(|i| DayCount {
                date: start + chrono::Days::new(i),
                count: if i == 6 { 5 } else { 0 },
            })
            .collect();
        WeeklyReport { days, total: 5 }
    }

    #[test]
    fn test_track_reply() {
        assert_eq!(track_reply(3), "Tracked. Count for today: 3");
    }

    #[test]
    fn test_weekly_reply_lists_every_day() {
        let text = weekly_reply(&sample_report());
        let lines: Vec<&str> = text.lines().collect();

        // Header + 7 days + total
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "2025-06-04: 0");
        assert_eq!(lines[7], "2025-06-10: 5");
        assert_eq!(lines[8], "Total: 5");
    }

    #[test]
    fn test_undo_replies() {
        assert_eq!(undo_reply(true), "Undone. Last entry removed.");
        assert_eq!(undo_reply(false), "Nothing to undo for today.");
    }

    #[test]
    fn test_reset_replies() {
        assert!(reset_reply(4).contains("4 records"));
        assert_eq!(reset_reply(0), "No history to clear.");
    }

    #[test]
    fn test_help_mentions_every_command() {
        let help = help_text();
        for cmd in ["/track", "/today", "/week", "/month", "/undo", "/reset"] {
            assert!(help.contains(cmd), "help is missing {cmd}");
        }
    }
}
