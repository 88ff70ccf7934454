//! Insight engine for HabitFlow
//!
//! This module analyzes completion history to surface actionable signals:
//! completion-rate primitives, streak-break risk scoring, milestone
//! detection, and behavioral pattern analysis. Everything here is pure
//! computation over reduced daily completions; the coaching layer turns
//! the results into messages.

mod milestone;
mod patterns;
mod rates;
mod risk;

pub use milestone::{detect_milestone, MilestoneDetection, MilestoneKind};

pub use patterns::{detect_patterns, PatternInsight, PatternKind};

pub use rates::{
    day_name, day_of_week_stats, day_of_week_success_rate, period_completion_rate, DayRate,
    WEEK_SUNDAY_FIRST,
};

pub use risk::{assess_risk, RiskAssessment};
