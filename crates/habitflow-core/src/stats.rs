//! Per-habit statistics over a trailing period.
//!
//! Unlike the rate helpers in [`crate::insight`], the headline completion
//! rate here divides by the full period length: an unlogged day counts
//! against you. Supporting numbers (averages, partial counts) stay scoped
//! to observed days.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::{completions_in_range, reduce_to_daily, DailyCompletion};
use crate::habit::{Habit, HabitLog, LogStatus};
use crate::streak::StreakCalculator;

/// Direction the trailing two weeks are moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

/// Summary of one habit over the trailing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStatistics {
    pub habit_id: Uuid,
    pub habit_name: String,
    pub period_days: u32,
    /// Completed days over the full period, one decimal place.
    pub completion_rate: f64,
    pub completed_days: u32,
    /// Observed days whose status was partial.
    pub partial_days: u32,
    /// Days in the period with no log entry at all. Observed misses are
    /// visible through the completion rate instead.
    pub missed_days: u32,
    pub total_days: u32,
    /// Mean recorded count over observed days, one decimal place.
    pub average_actual_count: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub trend: Trend,
    /// Weekday with the most completions in the period, abbreviated.
    pub best_day_of_week: String,
}

/// Completion-rate breakdown over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRateResult {
    /// Percent of observed days that count as completed.
    pub overall: f64,
    /// Percent of observed days logged with completed status.
    pub perfect: f64,
    /// Percent logged partial.
    pub partial: f64,
    /// Percent logged missed or skipped.
    pub missed: f64,
    pub average_actual_count: f64,
    pub total_days: u32,
    pub completed_days: u32,
}

/// Builds [`HabitStatistics`] for a configurable trailing window.
#[derive(Debug, Clone, Copy)]
pub struct StatsCalculator {
    period_days: u32,
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self { period_days: 30 }
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(period_days: u32) -> Self {
        Self { period_days: period_days.max(1) }
    }

    pub fn period_days(&self) -> u32 {
        self.period_days
    }

    /// Summarizes the habit over the `period_days` ending at `today`.
    pub fn summarize(&self, habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> HabitStatistics {
        let period_start = today
            .checked_sub_days(Days::new(self.period_days as u64 - 1))
            .unwrap_or(today);
        let in_period = completions_in_range(logs, period_start, today);

        let observed = in_period.len() as u32;
        let completed_days = in_period.iter().filter(|c| c.is_completed).count() as u32;
        let partial_days = in_period
            .iter()
            .filter(|c| c.status == LogStatus::Partial)
            .count() as u32;
        let total_actual: u32 = in_period.iter().map(|c| c.actual_count).sum();

        let streaks = StreakCalculator::new().calculate(habit, logs, today);

        HabitStatistics {
            habit_id: habit.id,
            habit_name: habit.name.clone(),
            period_days: self.period_days,
            completion_rate: round1(completed_days as f64 / self.period_days as f64 * 100.0),
            completed_days,
            partial_days,
            missed_days: self.period_days.saturating_sub(observed),
            total_days: self.period_days,
            average_actual_count: if observed == 0 {
                0.0
            } else {
                round1(total_actual as f64 / observed as f64)
            },
            current_streak: streaks.current_streak,
            longest_streak: streaks.longest_streak,
            trend: trend(&in_period, today),
            best_day_of_week: best_day_of_week(&in_period),
        }
    }
}

/// Status breakdown over every observed day in `logs`.
pub fn completion_rates(logs: &[HabitLog]) -> CompletionRateResult {
    let daily = reduce_to_daily(logs);
    let total_days = daily.len() as u32;
    if total_days == 0 {
        return CompletionRateResult {
            overall: 0.0,
            perfect: 0.0,
            partial: 0.0,
            missed: 0.0,
            average_actual_count: 0.0,
            total_days: 0,
            completed_days: 0,
        };
    }

    let completed_days = daily.iter().filter(|c| c.is_completed).count() as u32;
    let by_status = |wanted: fn(LogStatus) -> bool| {
        daily.iter().filter(|c| wanted(c.status)).count() as f64
    };
    let total = total_days as f64;
    let total_actual: u32 = daily.iter().map(|c| c.actual_count).sum();

    CompletionRateResult {
        overall: round1(completed_days as f64 / total * 100.0),
        perfect: round1(by_status(|s| s == LogStatus::Completed) / total * 100.0),
        partial: round1(by_status(|s| s == LogStatus::Partial) / total * 100.0),
        missed: round1(
            by_status(|s| matches!(s, LogStatus::Missed | LogStatus::Skipped)) / total * 100.0,
        ),
        average_actual_count: round1(total_actual as f64 / total),
        total_days,
        completed_days,
    }
}

/// Compares the trailing 7 days against the 7 before, both over fixed
/// 7-day denominators; more than 10 points either way moves the needle.
fn trend(in_period: &[DailyCompletion], today: NaiveDate) -> Trend {
    let rate_between = |from: Option<NaiveDate>, to: Option<NaiveDate>| -> f64 {
        let (Some(from), Some(to)) = (from, to) else {
            return 0.0;
        };
        let completed = in_period
            .iter()
            .filter(|c| c.date >= from && c.date <= to && c.is_completed)
            .count();
        completed as f64 / 7.0 * 100.0
    };

    let last7 = rate_between(today.checked_sub_days(Days::new(6)), Some(today));
    let prev7 = rate_between(
        today.checked_sub_days(Days::new(13)),
        today.checked_sub_days(Days::new(7)),
    );

    if last7 > prev7 + 10.0 {
        Trend::Improving
    } else if last7 < prev7 - 10.0 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday with the most completed days; earlier weekdays (Sunday first)
/// win ties, and a history with no completions reports Sunday.
fn best_day_of_week(in_period: &[DailyCompletion]) -> String {
    let mut counts = [0u32; 7];
    for completion in in_period.iter().filter(|c| c.is_completed) {
        counts[completion.date.weekday().num_days_from_sunday() as usize] += 1;
    }
    let mut best = 0usize;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    SHORT_DAY_NAMES[best].to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
