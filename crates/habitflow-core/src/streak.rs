//! Streak computation with configurable forgiveness.
//!
//! Operates on reduced daily completions (see [`crate::completion`]) and
//! a caller-supplied `today`, never on the system clock. Unobserved
//! calendar days are invisible to the scans; only days with a log entry
//! count as either completed or missed.
//!
//! - Current and perfect streaks scan newest to oldest and stop at the
//!   first miss beyond the forgiveness budget.
//! - Longest streak scans oldest to newest with its own accounting, kept
//!   in [`longest_streak_with_forgiveness`].
//! - Quality grades how much forgiveness the current streak consumed.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::completion::{reduce_to_daily, DailyCompletion};
use crate::habit::{Habit, HabitFrequency, HabitLog};

/// Cadence the streak is counted against, taken from the habit frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakType {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl From<HabitFrequency> for StreakType {
    fn from(frequency: HabitFrequency) -> Self {
        match frequency {
            HabitFrequency::Daily => StreakType::Daily,
            HabitFrequency::Weekly => StreakType::Weekly,
            HabitFrequency::Monthly => StreakType::Monthly,
            HabitFrequency::Custom => StreakType::Custom,
        }
    }
}

/// How cleanly the current streak was earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakQuality {
    /// No forgiveness used.
    Perfect,
    /// One or two forgiven misses.
    Excellent,
    /// Three to five forgiven misses.
    Good,
    /// More than five forgiven misses, or no active streak at all.
    Fair,
}

impl StreakQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakQuality::Perfect => "perfect",
            StreakQuality::Excellent => "excellent",
            StreakQuality::Good => "good",
            StreakQuality::Fair => "fair",
        }
    }
}

/// Full streak state for one habit at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Completed days in the unbroken (forgiveness included) run ending at
    /// the newest observed day.
    pub current_streak: u32,
    /// Longest completed-day run anywhere in history.
    pub longest_streak: u32,
    /// Completed days counted before the first forgiven miss in the
    /// current run; equals `current_streak` when nothing was forgiven.
    pub perfect_streak: u32,
    /// Oldest completed day inside the current run.
    pub streak_start_date: Option<NaiveDate>,
    /// Newest completed day overall.
    pub last_completion_date: Option<NaiveDate>,
    /// When the next completion is due, based on the habit frequency.
    /// Falls back to `today` when nothing was ever completed.
    pub next_expected_date: NaiveDate,
    /// True when the scan found at least one completed day before breaking.
    pub is_streak_active: bool,
    pub forgiveness_days_used: u32,
    pub forgiveness_days_remaining: u32,
    pub streak_type: StreakType,
    pub streak_quality: StreakQuality,
}

/// Computes [`StreakInfo`] from raw logs.
///
/// The forgiveness limit is the number of observed missed days tolerated
/// before the current streak breaks. Zero means strict consecutive
/// counting.
#[derive(Debug, Clone, Copy)]
pub struct StreakCalculator {
    forgiveness_limit: u32,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self { forgiveness_limit: 1 }
    }
}

impl StreakCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forgiveness_limit(forgiveness_limit: u32) -> Self {
        Self { forgiveness_limit }
    }

    pub fn forgiveness_limit(&self) -> u32 {
        self.forgiveness_limit
    }

    /// Reduces `logs` to daily completions and computes the full streak
    /// state as of `today`.
    pub fn calculate(&self, habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> StreakInfo {
        let daily = reduce_to_daily(logs);
        if daily.is_empty() {
            return self.empty_info(habit, today);
        }

        let mut current_streak = 0u32;
        let mut perfect_streak = 0u32;
        let mut forgiveness_days_used = 0u32;
        let mut missed_in_run = 0u32;
        let mut is_streak_active = false;
        let mut last_completion_date: Option<NaiveDate> = None;
        let mut streak_start_date: Option<NaiveDate> = None;

        // Newest to oldest. Forgiven misses keep the scan alive but do not
        // add to the streak count.
        for day in daily.iter().rev() {
            if day.is_completed {
                current_streak += 1;
                if missed_in_run == 0 {
                    perfect_streak += 1;
                }
                if last_completion_date.is_none() {
                    last_completion_date = Some(day.date);
                    is_streak_active = true;
                }
                // Overwritten on every completed day, so it converges to
                // the oldest day of the run once the scan stops.
                streak_start_date = Some(day.date);
            } else {
                missed_in_run += 1;
                if missed_in_run <= self.forgiveness_limit {
                    forgiveness_days_used += 1;
                } else {
                    break;
                }
            }
        }

        let longest_streak = longest_streak_with_forgiveness(&daily, self.forgiveness_limit);

        StreakInfo {
            current_streak,
            longest_streak,
            perfect_streak,
            streak_start_date,
            last_completion_date,
            next_expected_date: next_expected(habit.frequency, last_completion_date, today),
            is_streak_active,
            forgiveness_days_used,
            forgiveness_days_remaining: self.forgiveness_limit.saturating_sub(forgiveness_days_used),
            streak_type: habit.frequency.into(),
            streak_quality: quality(forgiveness_days_used, current_streak),
        }
    }

    fn empty_info(&self, habit: &Habit, today: NaiveDate) -> StreakInfo {
        StreakInfo {
            current_streak: 0,
            longest_streak: 0,
            perfect_streak: 0,
            streak_start_date: None,
            last_completion_date: None,
            next_expected_date: today,
            is_streak_active: false,
            forgiveness_days_used: 0,
            forgiveness_days_remaining: self.forgiveness_limit,
            streak_type: habit.frequency.into(),
            streak_quality: StreakQuality::Fair,
        }
    }
}

/// Longest completed-day run over the whole history, oldest to newest.
///
/// The miss counter is cumulative across a run: it is cleared only when it
/// overflows the limit and ends the run, never by an intervening completed
/// day. Spread-out misses therefore break a long run earlier than the
/// per-break accounting used for the current streak. Downstream consumers
/// depend on these exact numbers; keep the accounting in this one place.
pub fn longest_streak_with_forgiveness(daily: &[DailyCompletion], forgiveness_limit: u32) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut missed = 0u32;

    for day in daily {
        if day.is_completed {
            run += 1;
        } else {
            missed += 1;
            if missed > forgiveness_limit {
                longest = longest.max(run);
                run = 0;
                missed = 0;
            }
        }
    }

    longest.max(run)
}

fn quality(forgiveness_days_used: u32, current_streak: u32) -> StreakQuality {
    if current_streak == 0 {
        return StreakQuality::Fair;
    }
    match forgiveness_days_used {
        0 => StreakQuality::Perfect,
        1..=2 => StreakQuality::Excellent,
        3..=5 => StreakQuality::Good,
        _ => StreakQuality::Fair,
    }
}

fn next_expected(
    frequency: HabitFrequency,
    last_completion: Option<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    let Some(last) = last_completion else {
        return today;
    };
    match frequency {
        HabitFrequency::Daily | HabitFrequency::Custom => {
            last.checked_add_days(Days::new(1)).unwrap_or(last)
        }
        HabitFrequency::Weekly => last.checked_add_days(Days::new(7)).unwrap_or(last),
        // Clamps to the end of shorter months (Jan 31 -> Feb 28).
        HabitFrequency::Monthly => last.checked_add_months(Months::new(1)).unwrap_or(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{HabitCategory, LogStatus};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn utc_datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    fn make_habit(frequency: HabitFrequency) -> Habit {
        let now = utc_datetime(2026, 1, 1, 0, 0);
        Habit {
            id: Uuid::new_v4(),
            user_id: "default-user".to_string(),
            name: "Morning run".to_string(),
            description: None,
            category: HabitCategory::Fitness,
            frequency,
            target_count: 1,
            target_unit: Some("session".to_string()),
            custom_frequency: None,
            reminders: None,
            is_active: true,
            start_date: Some(date(2026, 1, 1)),
            end_date: None,
            current_streak: 0,
            longest_streak: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn log_on(habit: &Habit, day: NaiveDate, status: LogStatus) -> HabitLog {
        HabitLog {
            id: Uuid::new_v4(),
            habit_id: habit.id,
            user_id: habit.user_id.clone(),
            log_date: day.and_hms_opt(0, 0, 0).unwrap().and_utc(),
            status,
            actual_count: if status == LogStatus::Completed { 1 } else { 0 },
            target_count: Some(1),
            unit: None,
            notes: None,
            created_at: day.and_hms_opt(8, 0, 0).unwrap().and_utc(),
            updated_at: None,
        }
    }

    fn days_from(start: NaiveDate, statuses: &[LogStatus], habit: &Habit) -> Vec<HabitLog> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, &status)| {
                log_on(habit, start + Days::new(i as u64), status)
            })
            .collect()
    }

    const C: LogStatus = LogStatus::Completed;
    const M: LogStatus = LogStatus::Missed;

    #[test]
    fn test_three_completed_days_make_a_perfect_streak() {
        let habit = make_habit(HabitFrequency::Daily);
        let logs = days_from(date(2026, 1, 1), &[C, C, C], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 3));

        assert_eq!(info.current_streak, 3);
        assert_eq!(info.longest_streak, 3);
        assert_eq!(info.perfect_streak, 3);
        assert_eq!(info.forgiveness_days_used, 0);
        assert_eq!(info.streak_quality, StreakQuality::Perfect);
        assert!(info.is_streak_active);
        assert_eq!(info.streak_start_date, Some(date(2026, 1, 1)));
        assert_eq!(info.last_completion_date, Some(date(2026, 1, 3)));
    }

    #[test]
    fn test_single_miss_is_forgiven_and_counted() {
        let habit = make_habit(HabitFrequency::Daily);
        let logs = days_from(date(2026, 1, 1), &[C, M, C], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 3));

        // The forgiven day keeps the run alive but only completed days count.
        assert_eq!(info.current_streak, 2);
        assert_eq!(info.perfect_streak, 1);
        assert_eq!(info.forgiveness_days_used, 1);
        assert_eq!(info.forgiveness_days_remaining, 0);
        assert_eq!(info.streak_quality, StreakQuality::Excellent);
        assert_eq!(info.streak_start_date, Some(date(2026, 1, 1)));
        assert_eq!(info.last_completion_date, Some(date(2026, 1, 3)));
    }

    #[test]
    fn test_trailing_misses_beyond_budget_break_before_any_completion() {
        let habit = make_habit(HabitFrequency::Daily);
        let logs = days_from(date(2026, 1, 1), &[C, M, M], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 3));

        // Scanned newest first: one miss forgiven, the second breaks the
        // run before any completed day was reached.
        assert_eq!(info.current_streak, 0);
        assert_eq!(info.perfect_streak, 0);
        assert_eq!(info.forgiveness_days_used, 1);
        assert!(!info.is_streak_active);
        assert_eq!(info.last_completion_date, None);
        assert_eq!(info.streak_start_date, None);
        assert_eq!(info.streak_quality, StreakQuality::Fair);
        // Nothing completed within the run, so the next one is due today.
        assert_eq!(info.next_expected_date, date(2026, 1, 3));
    }

    #[test]
    fn test_zero_forgiveness_counts_strictly() {
        let habit = make_habit(HabitFrequency::Daily);
        let logs = days_from(date(2026, 1, 1), &[C, C, M, C, C], &habit);
        let calc = StreakCalculator::with_forgiveness_limit(0);
        let info = calc.calculate(&habit, &logs, date(2026, 1, 5));

        assert_eq!(info.current_streak, 2);
        assert_eq!(info.forgiveness_days_used, 0);
        assert_eq!(info.forgiveness_days_remaining, 0);
        assert_eq!(info.longest_streak, 2);
        assert_eq!(info.streak_quality, StreakQuality::Perfect);
        assert_eq!(info.streak_start_date, Some(date(2026, 1, 4)));
    }

    #[test]
    fn test_unobserved_gap_days_are_invisible() {
        let habit = make_habit(HabitFrequency::Daily);
        // Jan 1, skip several calendar days, Jan 5: no logs in between,
        // so nothing breaks.
        let logs = vec![
            log_on(&habit, date(2026, 1, 1), C),
            log_on(&habit, date(2026, 1, 5), C),
        ];
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 5));

        assert_eq!(info.current_streak, 2);
        assert_eq!(info.forgiveness_days_used, 0);
        assert_eq!(info.streak_quality, StreakQuality::Perfect);
    }

    #[test]
    fn test_longest_streak_miss_budget_spans_the_whole_run() {
        let habit = make_habit(HabitFrequency::Daily);
        // Two misses separated by completions still share one budget, so
        // the second miss ends the first run.
        let logs = days_from(date(2026, 1, 1), &[C, C, M, C, C, M, C], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 7));

        assert_eq!(info.longest_streak, 4);
        // The current scan starts fresh from the newest day, so it sees
        // only one miss and forgives it.
        assert_eq!(info.current_streak, 3);
        assert_eq!(info.forgiveness_days_used, 1);
    }

    #[test]
    fn test_longest_streak_counts_completed_days_only() {
        let daily = reduce_to_daily(&days_from(
            date(2026, 1, 1),
            &[C, M, C, C],
            &make_habit(HabitFrequency::Daily),
        ));
        assert_eq!(longest_streak_with_forgiveness(&daily, 1), 3);
        assert_eq!(longest_streak_with_forgiveness(&daily, 0), 2);
    }

    #[test]
    fn test_longest_is_never_below_current() {
        let habit = make_habit(HabitFrequency::Daily);
        for statuses in [
            vec![C, C, C],
            vec![C, M, C],
            vec![M, M, C, C],
            vec![C, C, M, M, C],
        ] {
            let logs = days_from(date(2026, 1, 1), &statuses, &habit);
            let info = StreakCalculator::new().calculate(
                &habit,
                &logs,
                date(2026, 1, 1) + Days::new(statuses.len() as u64 - 1),
            );
            assert!(
                info.longest_streak >= info.current_streak,
                "longest {} < current {} for {:?}",
                info.longest_streak,
                info.current_streak,
                statuses
            );
        }
    }

    #[test]
    fn test_quality_tiers_follow_forgiveness_used() {
        assert_eq!(quality(0, 5), StreakQuality::Perfect);
        assert_eq!(quality(1, 5), StreakQuality::Excellent);
        assert_eq!(quality(2, 5), StreakQuality::Excellent);
        assert_eq!(quality(3, 5), StreakQuality::Good);
        assert_eq!(quality(5, 5), StreakQuality::Good);
        assert_eq!(quality(6, 5), StreakQuality::Fair);
        // No active streak is fair no matter how clean the scan was.
        assert_eq!(quality(0, 0), StreakQuality::Fair);
    }

    #[test]
    fn test_empty_history_yields_inactive_zero_streaks() {
        let habit = make_habit(HabitFrequency::Daily);
        let calc = StreakCalculator::with_forgiveness_limit(2);
        let info = calc.calculate(&habit, &[], date(2026, 3, 1));

        assert_eq!(info.current_streak, 0);
        assert_eq!(info.longest_streak, 0);
        assert_eq!(info.perfect_streak, 0);
        assert!(!info.is_streak_active);
        assert_eq!(info.next_expected_date, date(2026, 3, 1));
        assert_eq!(info.forgiveness_days_used, 0);
        assert_eq!(info.forgiveness_days_remaining, 2);
        assert_eq!(info.streak_quality, StreakQuality::Fair);
        assert_eq!(info.streak_type, StreakType::Daily);
    }

    #[test]
    fn test_next_expected_date_follows_frequency() {
        let last = date(2026, 1, 10);
        let today = date(2026, 1, 12);
        assert_eq!(next_expected(HabitFrequency::Daily, Some(last), today), date(2026, 1, 11));
        assert_eq!(next_expected(HabitFrequency::Custom, Some(last), today), date(2026, 1, 11));
        assert_eq!(next_expected(HabitFrequency::Weekly, Some(last), today), date(2026, 1, 17));
        assert_eq!(next_expected(HabitFrequency::Monthly, Some(last), today), date(2026, 2, 10));
        assert_eq!(next_expected(HabitFrequency::Daily, None, today), today);
    }

    #[test]
    fn test_monthly_next_expected_clamps_short_months() {
        let info_date = next_expected(HabitFrequency::Monthly, Some(date(2026, 1, 31)), date(2026, 2, 1));
        assert_eq!(info_date, date(2026, 2, 28));
    }

    #[test]
    fn test_streak_type_tracks_frequency() {
        let habit = make_habit(HabitFrequency::Weekly);
        let logs = days_from(date(2026, 1, 1), &[C], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 1));
        assert_eq!(info.streak_type, StreakType::Weekly);
        assert_eq!(info.next_expected_date, date(2026, 1, 8));
    }

    #[test]
    fn test_duplicate_logs_do_not_inflate_streaks() {
        let habit = make_habit(HabitFrequency::Daily);
        let mut logs = days_from(date(2026, 1, 1), &[C, C], &habit);
        // A duplicate completion for Jan 2, created later the same day.
        let mut dup = log_on(&habit, date(2026, 1, 2), C);
        dup.created_at = utc_datetime(2026, 1, 2, 22, 0);
        logs.push(dup);

        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 2));
        assert_eq!(info.current_streak, 2);
        assert_eq!(info.longest_streak, 2);
    }

    #[test]
    fn test_forgiven_day_between_completions_keeps_streak_dates() {
        let habit = make_habit(HabitFrequency::Daily);
        let logs = days_from(date(2026, 1, 1), &[C, C, M, C], &habit);
        let info = StreakCalculator::new().calculate(&habit, &logs, date(2026, 1, 4));

        assert_eq!(info.current_streak, 3);
        assert_eq!(info.perfect_streak, 1);
        assert_eq!(info.streak_start_date, Some(date(2026, 1, 1)));
        assert_eq!(info.last_completion_date, Some(date(2026, 1, 4)));
        assert_eq!(info.next_expected_date, date(2026, 1, 5));
    }
}
