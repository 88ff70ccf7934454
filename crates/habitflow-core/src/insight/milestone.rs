//! Streak milestone detection.
//!
//! Milestones fire only on the exact day a threshold is reached. A streak
//! sitting at 8 gets nothing; the 7-day celebration already happened (or
//! was skipped, if logs arrived in bulk).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::habit::Habit;

/// Recognized streak thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Week,
    TwoWeeks,
    ThreeWeeks,
    Month,
    Century,
}

impl MilestoneKind {
    /// All thresholds, ascending.
    pub const ALL: [MilestoneKind; 5] = [
        MilestoneKind::Week,
        MilestoneKind::TwoWeeks,
        MilestoneKind::ThreeWeeks,
        MilestoneKind::Month,
        MilestoneKind::Century,
    ];

    /// Streak length that triggers this milestone.
    pub fn days(&self) -> u32 {
        match self {
            MilestoneKind::Week => 7,
            MilestoneKind::TwoWeeks => 14,
            MilestoneKind::ThreeWeeks => 21,
            MilestoneKind::Month => 30,
            MilestoneKind::Century => 100,
        }
    }

    /// Display name used in message subjects.
    pub fn label(&self) -> &'static str {
        match self {
            MilestoneKind::Week => "7-Day Streak",
            MilestoneKind::TwoWeeks => "2-Week Streak",
            MilestoneKind::ThreeWeeks => "3-Week Streak",
            MilestoneKind::Month => "30-Day Streak",
            MilestoneKind::Century => "100-Day Streak",
        }
    }
}

/// A milestone the habit reached today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDetection {
    pub habit_id: Uuid,
    pub kind: MilestoneKind,
    pub streak_length: u32,
    /// True when this is a new personal record rather than a repeat after
    /// a break.
    pub is_first: bool,
}

/// Checks the habit's denormalized current streak against the thresholds.
///
/// Callers are expected to refresh `current_streak`/`longest_streak` from
/// logs before asking.
pub fn detect_milestone(habit: &Habit) -> Option<MilestoneDetection> {
    MilestoneKind::ALL
        .iter()
        .find(|kind| habit.current_streak == kind.days())
        .map(|&kind| MilestoneDetection {
            habit_id: habit.id,
            kind,
            streak_length: habit.current_streak,
            is_first: habit.longest_streak == habit.current_streak,
        })
}
