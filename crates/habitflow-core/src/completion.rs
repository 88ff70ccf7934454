//! Daily completion reduction.
//!
//! Raw habit logs are append-oriented: a day can accumulate duplicate or
//! corrected entries. Everything downstream (streaks, insights, stats)
//! works on one canonical [`DailyCompletion`] per calendar day, produced
//! here by a last-write-wins reduction:
//!
//! - Logs are bucketed by the UTC calendar date of `log_date`.
//! - Within a bucket the entry with the greatest `created_at` wins; on a
//!   tie the later-appended entry wins.
//! - Output is sorted by date ascending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Entry};
use uuid::Uuid;

use crate::habit::{HabitLog, LogStatus};

/// Canonical per-day completion state derived from raw logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub actual_count: u32,
    /// Target recorded on the winning log; 0 when the log carried none.
    pub target_count: u32,
    pub status: LogStatus,
    /// True when the status says completed, or the count reached a
    /// positive target regardless of status.
    pub is_completed: bool,
    /// actual/target as a whole percent, capped at 100; 0 without a target.
    pub completion_percentage: u8,
    /// The log entry that won the reduction for this day.
    pub log_id: Uuid,
}

/// Collapses raw logs into at most one completion per calendar day.
///
/// The result is sorted by date ascending. An empty slice yields an
/// empty vector.
pub fn reduce_to_daily(logs: &[HabitLog]) -> Vec<DailyCompletion> {
    let mut winners: BTreeMap<NaiveDate, &HabitLog> = BTreeMap::new();
    for log in logs {
        let day = log.log_date.date_naive();
        match winners.entry(day) {
            Entry::Vacant(slot) => {
                slot.insert(log);
            }
            Entry::Occupied(mut slot) => {
                // >= so that among equal timestamps the later entry wins
                if log.created_at >= slot.get().created_at {
                    slot.insert(log);
                }
            }
        }
    }
    winners
        .into_iter()
        .map(|(date, log)| completion_from_log(date, log))
        .collect()
}

/// The canonical completion for a single day, if any log touched it.
pub fn completion_on_date(logs: &[HabitLog], date: NaiveDate) -> Option<DailyCompletion> {
    reduce_to_daily(logs).into_iter().find(|c| c.date == date)
}

/// Canonical completions within `[start, end]` (both inclusive).
pub fn completions_in_range(
    logs: &[HabitLog],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyCompletion> {
    reduce_to_daily(logs)
        .into_iter()
        .filter(|c| c.date >= start && c.date <= end)
        .collect()
}

fn completion_from_log(date: NaiveDate, log: &HabitLog) -> DailyCompletion {
    let target = log.target_count.unwrap_or(0);
    let completion_percentage = if target > 0 {
        let percent = (log.actual_count as f64 / target as f64 * 100.0).round() as u32;
        percent.min(100) as u8
    } else {
        0
    };
    let is_completed =
        log.status == LogStatus::Completed || (target > 0 && log.actual_count >= target);
    DailyCompletion {
        date,
        actual_count: log.actual_count,
        target_count: target,
        status: log.status,
        is_completed,
        completion_percentage,
        log_id: log.id,
    }
}
