//! Completion-rate primitives shared by risk scoring and pattern analysis.
//!
//! All rates are percentages over observed days only: days without a log
//! entry do not enter the denominator. A weekday nobody ever logged on
//! reports 0, the same value as a weekday that was always missed; callers
//! that need to tell the two apart must check for observations first.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::completion::DailyCompletion;

/// Weekdays in the order rates are reported, Sunday first.
pub const WEEK_SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English name, used verbatim in user-facing messages.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Success rate of one weekday, paired with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRate {
    pub day: String,
    /// Whole percent, already rounded.
    pub rate: f64,
}

/// Percentage of observed days on `weekday` that were completed, rounded
/// to a whole percent. 0 when the weekday was never observed.
pub fn day_of_week_success_rate(days: &[DailyCompletion], weekday: Weekday) -> f64 {
    let mut observed = 0u32;
    let mut completed = 0u32;
    for day in days.iter().filter(|d| d.date.weekday() == weekday) {
        observed += 1;
        if day.is_completed {
            completed += 1;
        }
    }
    if observed == 0 {
        return 0.0;
    }
    (completed as f64 / observed as f64 * 100.0).round()
}

/// Rates for all seven weekdays, Sunday first.
pub fn day_of_week_stats(days: &[DailyCompletion]) -> Vec<DayRate> {
    WEEK_SUNDAY_FIRST
        .iter()
        .map(|&weekday| DayRate {
            day: day_name(weekday).to_string(),
            rate: day_of_week_success_rate(days, weekday),
        })
        .collect()
}

/// Completion rate over the `period_days` calendar days ending at
/// `today - offset_days`, as a rounded whole percent.
///
/// The window is `(end - period_days, end]`. Only observed days count
/// toward the denominator; an empty window reports 0.
pub fn period_completion_rate(
    days: &[DailyCompletion],
    period_days: u32,
    offset_days: u32,
    today: NaiveDate,
) -> f64 {
    let Some(end) = today.checked_sub_days(Days::new(offset_days as u64)) else {
        return 0.0;
    };
    let Some(start_exclusive) = end.checked_sub_days(Days::new(period_days as u64)) else {
        return 0.0;
    };

    let mut observed = 0u32;
    let mut completed = 0u32;
    for day in days.iter().filter(|d| d.date > start_exclusive && d.date <= end) {
        observed += 1;
        if day.is_completed {
            completed += 1;
        }
    }
    if observed == 0 {
        return 0.0;
    }
    (completed as f64 / observed as f64 * 100.0).round()
}
