//! Behavioral pattern detection over completion history.
//!
//! Produces human-readable observations with enough structured data for
//! the coaching layer to pick a chart. Analysis needs at least seven raw
//! log entries; with fewer the weekday breakdown is mostly noise.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::reduce_to_daily;
use crate::habit::{Habit, HabitLog};
use crate::insight::rates::{day_of_week_stats, period_completion_rate, DayRate};

/// Structured payload behind a pattern insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternKind {
    /// A strong weekday, contrasted with the weakest one.
    DayPattern { best: DayRate, worst: DayRate },
    /// Trailing week clearly ahead of the two weeks before it.
    Improvement {
        current_rate: f64,
        prior_rate: f64,
        delta: f64,
    },
    /// Trailing week at 85% or better.
    Consistency { rate: f64 },
    /// Trailing week clearly behind the two weeks before it.
    Decline {
        current_rate: f64,
        prior_rate: f64,
        delta: f64,
    },
}

/// One detected pattern with its display message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternInsight {
    pub habit_id: Uuid,
    pub message: String,
    pub kind: PatternKind,
}

/// Detects notable patterns in the habit's history as of `today`.
///
/// Insights are reported in a fixed order: day pattern, improvement,
/// consistency, decline. Fewer than seven raw log entries yields none.
pub fn detect_patterns(habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> Vec<PatternInsight> {
    let mut insights = Vec::new();
    if logs.len() < 7 {
        return insights;
    }
    let daily = reduce_to_daily(logs);

    // Weekday contrast. Sorting is stable, so ties keep Sunday-first
    // order and the reported best day is deterministic.
    let mut by_rate = day_of_week_stats(&daily);
    by_rate.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal));
    if let (Some(best), Some(worst)) = (by_rate.first(), by_rate.last()) {
        // worst.rate > 0 also means every weekday has at least one
        // completion; a never-completed weekday reads as 0.
        if best.rate - worst.rate > 30.0 && worst.rate > 0.0 {
            insights.push(PatternInsight {
                habit_id: habit.id,
                message: format!(
                    "Your {} success rate ({}%) is much higher than {} ({}%)",
                    best.day, best.rate, worst.day, worst.rate
                ),
                kind: PatternKind::DayPattern {
                    best: best.clone(),
                    worst: worst.clone(),
                },
            });
        }
    }

    let current_rate = period_completion_rate(&daily, 7, 0, today);
    let prior_rate = period_completion_rate(&daily, 14, 7, today);

    if prior_rate > 0.0 && current_rate > prior_rate + 20.0 {
        insights.push(PatternInsight {
            habit_id: habit.id,
            message: format!(
                "Completion rate jumped {}% this week",
                (current_rate - prior_rate).round()
            ),
            kind: PatternKind::Improvement {
                current_rate,
                prior_rate,
                delta: current_rate - prior_rate,
            },
        });
    }

    if current_rate >= 85.0 {
        insights.push(PatternInsight {
            habit_id: habit.id,
            message: format!("Exceptional consistency this week ({}%)", current_rate.round()),
            kind: PatternKind::Consistency { rate: current_rate },
        });
    }

    if prior_rate > 0.0 && current_rate < prior_rate - 20.0 {
        insights.push(PatternInsight {
            habit_id: habit.id,
            message: format!(
                "Completion rate dropped {}% this week",
                (prior_rate - current_rate).round()
            ),
            kind: PatternKind::Decline {
                current_rate,
                prior_rate,
                delta: prior_rate - current_rate,
            },
        });
    }

    insights
}
