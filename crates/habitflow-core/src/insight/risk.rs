//! Additive risk scoring for streak breaks.
//!
//! Each signal contributes a fixed weight and a paired factor/
//! recommendation pair; the total is capped at 100. Signals look at
//! tomorrow, because the point is to warn before the break happens.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::{completion_on_date, reduce_to_daily};
use crate::habit::{Habit, HabitLog};
use crate::insight::rates::{day_name, day_of_week_success_rate, period_completion_rate};

/// Outcome of scoring one habit.
///
/// `risk_factors` and `recommendations` are parallel: entry N of one
/// explains entry N of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub habit_id: Uuid,
    /// 0 to 100; higher means more likely to break soon.
    pub risk_score: u8,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Scores how likely the habit's streak is to break, as of `today`.
///
/// Weights: missed yesterday 40, historically weak tomorrow 30, weak
/// weekend ahead 20, declining completion rate 10.
pub fn assess_risk(habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> RiskAssessment {
    let daily = reduce_to_daily(logs);
    let mut score = 0u32;
    let mut risk_factors = Vec::new();
    let mut recommendations = Vec::new();

    // Signal 1: yesterday was not completed. Only meaningful once any
    // history exists, otherwise every new habit would start at 40.
    let completed_yesterday = today
        .checked_sub_days(Days::new(1))
        .and_then(|yesterday| completion_on_date(logs, yesterday))
        .is_some_and(|c| c.is_completed);
    if !completed_yesterday && !daily.is_empty() {
        score += 40;
        risk_factors.push("Missed yesterday".to_string());
        recommendations.push("Use 2-minute rule—just show up".to_string());
    }

    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);

    // Signal 2: tomorrow's weekday has a weak track record. A rate of 0
    // means no observations and is skipped.
    let tomorrow_rate = day_of_week_success_rate(&daily, tomorrow.weekday());
    if tomorrow_rate > 0.0 && tomorrow_rate < 50.0 {
        score += 30;
        risk_factors.push(format!(
            "{} is historically difficult ({}% success)",
            day_name(tomorrow.weekday()),
            tomorrow_rate
        ));
        recommendations.push("Set a specific time and location for tomorrow".to_string());
    }

    // Signal 3: heading into a weekend that historically goes poorly.
    if matches!(tomorrow.weekday(), Weekday::Sat | Weekday::Sun) {
        let weekend_rate = (day_of_week_success_rate(&daily, Weekday::Sun)
            + day_of_week_success_rate(&daily, Weekday::Sat))
            / 2.0;
        if weekend_rate > 0.0 && weekend_rate < 60.0 {
            score += 20;
            risk_factors.push("Weekend ahead—routine disruption".to_string());
            recommendations.push("Plan weekend habit first thing in morning".to_string());
        }
    }

    // Signal 4: the trailing week fell more than 10 points behind the
    // two weeks before it.
    let last_week_rate = period_completion_rate(&daily, 7, 0, today);
    let prior_rate = period_completion_rate(&daily, 14, 7, today);
    if prior_rate > 0.0 && last_week_rate < prior_rate - 10.0 {
        score += 10;
        risk_factors.push("Completion rate declining".to_string());
        recommendations.push("Reduce friction—make it easier".to_string());
    }

    RiskAssessment {
        habit_id: habit.id,
        risk_score: score.min(100) as u8,
        risk_factors,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{HabitCategory, HabitFrequency, LogStatus};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    fn make_habit() -> Habit {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Habit {
            id: Uuid::new_v4(),
            user_id: "default-user".to_string(),
            name: "Read".to_string(),
            description: None,
            category: HabitCategory::Learning,
            frequency: HabitFrequency::Daily,
            target_count: 1,
            target_unit: None,
            custom_frequency: None,
            reminders: None,
            is_active: true,
            start_date: None,
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
            actual_count: u32::from(status == LogStatus::Completed),
            target_count: Some(1),
            unit: None,
            notes: None,
            created_at: day.and_hms_opt(8, 0, 0).unwrap().and_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_history_scores_zero() {
        let habit = make_habit();
        let risk = assess_risk(&habit, &[], date(2026, 1, 20));
        assert_eq!(risk.risk_score, 0);
        assert!(risk.risk_factors.is_empty());
        assert!(risk.recommendations.is_empty());
    }

    #[test]
    fn test_missed_yesterday_adds_forty() {
        let habit = make_habit();
        // Monday Jan 19 missed; scoring on Tuesday Jan 20, so tomorrow is
        // a Wednesday with no history (signal 2 silent).
        let logs = vec![log_on(&habit, date(2026, 1, 19), LogStatus::Missed)];
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        assert_eq!(risk.risk_score, 40);
        assert_eq!(risk.risk_factors, vec!["Missed yesterday".to_string()]);
        assert_eq!(risk.recommendations, vec!["Use 2-minute rule—just show up".to_string()]);
    }

    #[test]
    fn test_completed_yesterday_suppresses_the_miss_signal() {
        let habit = make_habit();
        let logs = vec![log_on(&habit, date(2026, 1, 19), LogStatus::Completed)];
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        assert_eq!(risk.risk_score, 0);
    }

    #[test]
    fn test_weak_tomorrow_weekday_adds_thirty_with_named_day() {
        let habit = make_habit();
        // Wednesdays Jan 7 and Jan 14: one completed, one missed (50% would
        // not fire; make it 1 of 3 for 33%). Jan 21 is also a Wednesday.
        let logs = vec![
            log_on(&habit, date(2026, 1, 7), LogStatus::Missed),
            log_on(&habit, date(2026, 1, 14), LogStatus::Missed),
            log_on(&habit, date(2026, 1, 21), LogStatus::Completed), // future relative to today
            // Keep yesterday completed so only signal 2 fires.
            log_on(&habit, date(2026, 1, 19), LogStatus::Completed),
        ];
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        assert_eq!(risk.risk_score, 30);
        assert_eq!(
            risk.risk_factors,
            vec!["Wednesday is historically difficult (33% success)".to_string()]
        );
        assert_eq!(
            risk.recommendations,
            vec!["Set a specific time and location for tomorrow".to_string()]
        );
    }

    #[test]
    fn test_weekday_with_no_history_does_not_fire() {
        let habit = make_habit();
        // Only Monday observed; tomorrow (Wednesday) has no data.
        let logs = vec![log_on(&habit, date(2026, 1, 19), LogStatus::Completed)];
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        assert_eq!(risk.risk_score, 0);
    }

    #[test]
    fn test_weak_weekend_ahead_adds_twenty() {
        let habit = make_habit();
        // Friday Jan 16; tomorrow is Saturday. Weekend history: Sat Jan 10
        // missed (0%), Sun Jan 11 completed (100%) -> average 50 < 60.
        // Saturday itself rates 0, so signal 2 stays silent.
        let logs = vec![
            log_on(&habit, date(2026, 1, 10), LogStatus::Missed),
            log_on(&habit, date(2026, 1, 11), LogStatus::Completed),
            log_on(&habit, date(2026, 1, 15), LogStatus::Completed), // yesterday (Thu)
        ];
        let risk = assess_risk(&habit, &logs, date(2026, 1, 16));
        assert_eq!(risk.risk_score, 20);
        assert_eq!(risk.risk_factors, vec!["Weekend ahead—routine disruption".to_string()]);
    }

    #[test]
    fn test_weekend_signal_silent_midweek() {
        let habit = make_habit();
        let logs = vec![
            log_on(&habit, date(2026, 1, 10), LogStatus::Missed),
            log_on(&habit, date(2026, 1, 11), LogStatus::Missed),
            log_on(&habit, date(2026, 1, 19), LogStatus::Completed),
        ];
        // Tuesday: tomorrow is Wednesday, not a weekend day.
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        assert_eq!(risk.risk_score, 0);
    }

    #[test]
    fn test_declining_rate_adds_ten() {
        let habit = make_habit();
        let mut logs = Vec::new();
        // Two weeks back: all completed.
        for d in 7..=13 {
            logs.push(log_on(&habit, date(2026, 1, d), LogStatus::Completed));
        }
        // Trailing week: all missed except yesterday, keeping signal 1 out.
        for d in 14..=18 {
            logs.push(log_on(&habit, date(2026, 1, d), LogStatus::Missed));
        }
        logs.push(log_on(&habit, date(2026, 1, 19), LogStatus::Completed));
        let risk = assess_risk(&habit, &logs, date(2026, 1, 20));
        // Trailing week Jan 14..=20: 1 of 6 observed completed (17%).
        // Prior window Jan 7..=13: 100%. Tomorrow is Wednesday: Jan 7 and
        // Jan 14 observed, 1 of 2 completed -> 50%, signal 2 silent.
        assert_eq!(risk.risk_score, 10);
        assert_eq!(risk.risk_factors, vec!["Completion rate declining".to_string()]);
        assert_eq!(risk.recommendations, vec!["Reduce friction—make it easier".to_string()]);
    }

    #[test]
    fn test_factors_and_recommendations_stay_parallel() {
        let habit = make_habit();
        let mut logs = Vec::new();
        for d in 5..=18 {
            logs.push(log_on(&habit, date(2026, 1, d), LogStatus::Missed));
        }
        let risk = assess_risk(&habit, &logs, date(2026, 1, 16));
        assert_eq!(risk.risk_factors.len(), risk.recommendations.len());
        assert!(risk.risk_score > 0);
    }

    #[test]
    fn test_all_signals_together_cap_at_one_hundred() {
        let habit = make_habit();
        let mut logs = Vec::new();
        // A missed Saturday in late December pulls the Saturday rate to
        // 1 of 3 (33%), then solid completion through Jan 9 and a week of
        // misses. Scored on Friday Jan 16, so tomorrow is that weak
        // Saturday.
        logs.push(log_on(&habit, date(2025, 12, 27), LogStatus::Missed));
        for d in 1..=9 {
            logs.push(log_on(&habit, date(2026, 1, d), LogStatus::Completed));
        }
        for d in 10..=15 {
            logs.push(log_on(&habit, date(2026, 1, d), LogStatus::Missed));
        }
        let risk = assess_risk(&habit, &logs, date(2026, 1, 16));
        // Missed yesterday (40) + weak Saturday (30) + weak weekend (20)
        // + declining rate (10) = exactly 100.
        assert_eq!(risk.risk_score, 100);
        assert_eq!(risk.risk_factors.len(), 4);
        assert_eq!(risk.recommendations.len(), 4);
        assert!(risk
            .risk_factors
            .iter()
            .any(|f| f == "Saturday is historically difficult (33% success)"));
    }
}
