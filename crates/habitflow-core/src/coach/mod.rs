//! Coaching message generation.
//!
//! Turns insight results (milestones, risk assessments, weekly numbers,
//! patterns) into persona-voiced messages. Nothing here sends anything;
//! the engine produces [`CoachingMessage`] values and callers decide what
//! to do with them.

mod persona;

pub use persona::Persona;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::reduce_to_daily;
use crate::habit::{Habit, HabitLog};
use crate::insight::{MilestoneDetection, PatternInsight, PatternKind, RiskAssessment};
use crate::streak::StreakQuality;

/// What prompted a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Milestone,
    Risk,
    Weekly,
    Insight,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Milestone => "milestone",
            MessageType::Risk => "risk",
            MessageType::Weekly => "weekly",
            MessageType::Insight => "insight",
        }
    }
}

/// Delivery urgency hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePriority {
    High,
    Medium,
    Low,
}

impl MessagePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagePriority::High => "high",
            MessagePriority::Medium => "medium",
            MessagePriority::Low => "low",
        }
    }
}

/// Chart a renderer could attach to illustrate the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Streak,
    Heatmap,
    Trends,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Streak => "streak",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Trends => "trends",
        }
    }
}

/// A rendered coaching message, ready for whatever channel the caller
/// has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingMessage {
    pub habit_id: Uuid,
    pub message_type: MessageType,
    pub subject: String,
    pub body: String,
    /// Suggested visualizations, in preference order.
    pub charts: Vec<ChartKind>,
    pub priority: MessagePriority,
}

/// Everything a persona template can interpolate.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContext {
    Milestone {
        habit_name: String,
        streak: u32,
        is_first: bool,
        quality: StreakQuality,
    },
    Risk {
        habit_name: String,
        streak: u32,
        risk_factors: Vec<String>,
        recommendations: Vec<String>,
    },
    Weekly {
        habit_name: String,
        days_completed: u32,
        completion_rate: i32,
        streak: u32,
        trend: i32,
    },
    Insight {
        habit_name: String,
        message: String,
        kind: PatternKind,
    },
}

/// This week versus last week, as used by weekly check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Completed days in the trailing 7.
    pub days_completed: u32,
    /// Trailing 7 days over a fixed denominator of 7.
    pub completion_rate: i32,
    /// Percentage-point change against the week before; negative when
    /// the week got worse.
    pub trend: i32,
}

impl WeeklyStats {
    /// Computes the trailing week (`today - 6 ..= today`) against the one
    /// before it. The prior week's rate uses observed days only, so a
    /// sparsely logged past does not exaggerate the change.
    pub fn from_logs(logs: &[HabitLog], today: NaiveDate) -> Self {
        let daily = reduce_to_daily(logs);
        let in_window = |from_days_ago: u64, to_days_ago: u64| {
            let from = today.checked_sub_days(Days::new(from_days_ago));
            let to = today.checked_sub_days(Days::new(to_days_ago));
            daily
                .iter()
                .filter(move |c| {
                    from.is_some_and(|f| c.date >= f) && to.is_some_and(|t| c.date <= t)
                })
                .collect::<Vec<_>>()
        };

        let this_week = in_window(6, 0);
        let days_completed = this_week.iter().filter(|c| c.is_completed).count() as u32;
        let completion_rate = (days_completed as f64 / 7.0 * 100.0).round() as i32;

        let last_week = in_window(13, 7);
        let last_completed = last_week.iter().filter(|c| c.is_completed).count();
        let last_rate = if last_week.is_empty() {
            0
        } else {
            (last_completed as f64 / last_week.len() as f64 * 100.0).round() as i32
        };

        WeeklyStats {
            days_completed,
            completion_rate,
            trend: completion_rate - last_rate,
        }
    }
}

/// Builds coaching messages from insight results.
#[derive(Debug, Clone, Copy)]
pub struct CoachingEngine {
    persona: Persona,
    /// Risk scores below this are not worth a message.
    risk_threshold: u8,
}

impl Default for CoachingEngine {
    fn default() -> Self {
        Self {
            persona: Persona::Flex,
            risk_threshold: 60,
        }
    }
}

impl CoachingEngine {
    pub fn new(persona: Persona) -> Self {
        Self {
            persona,
            risk_threshold: 60,
        }
    }

    pub fn with_risk_threshold(persona: Persona, risk_threshold: u8) -> Self {
        Self {
            persona,
            risk_threshold,
        }
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Celebration for a milestone reached today. High priority; the
    /// quality line always reads perfect because milestones celebrate the
    /// streak, not its bookkeeping.
    pub fn milestone_message(
        &self,
        habit: &Habit,
        milestone: &MilestoneDetection,
    ) -> CoachingMessage {
        let body = self.persona.render(&MessageContext::Milestone {
            habit_name: habit.name.clone(),
            streak: milestone.streak_length,
            is_first: milestone.is_first,
            quality: StreakQuality::Perfect,
        });
        CoachingMessage {
            habit_id: habit.id,
            message_type: MessageType::Milestone,
            subject: format!("🎉 {}!", milestone.kind.label()),
            body,
            charts: vec![ChartKind::Streak],
            priority: MessagePriority::High,
        }
    }

    /// Warning for an at-risk streak, or `None` when the score is under
    /// the engine's threshold.
    pub fn risk_warning(&self, habit: &Habit, risk: &RiskAssessment) -> Option<CoachingMessage> {
        if risk.risk_score < self.risk_threshold {
            return None;
        }
        let body = self.persona.render(&MessageContext::Risk {
            habit_name: habit.name.clone(),
            streak: habit.current_streak,
            risk_factors: risk.risk_factors.clone(),
            recommendations: risk.recommendations.clone(),
        });
        Some(CoachingMessage {
            habit_id: habit.id,
            message_type: MessageType::Risk,
            subject: format!("⚠️ Streak Alert: {}", habit.name),
            body,
            charts: vec![ChartKind::Heatmap],
            priority: MessagePriority::High,
        })
    }

    /// Weekly progress summary.
    pub fn weekly_checkin(&self, habit: &Habit, stats: &WeeklyStats) -> CoachingMessage {
        let body = self.persona.render(&MessageContext::Weekly {
            habit_name: habit.name.clone(),
            days_completed: stats.days_completed,
            completion_rate: stats.completion_rate,
            streak: habit.current_streak,
            trend: stats.trend,
        });
        CoachingMessage {
            habit_id: habit.id,
            message_type: MessageType::Weekly,
            subject: format!("📊 Weekly Progress: {}", habit.name),
            body,
            charts: vec![ChartKind::Trends, ChartKind::Heatmap],
            priority: MessagePriority::Medium,
        }
    }

    /// Low-priority note about a detected pattern. Day patterns point at
    /// the heatmap; rate movements point at the trend chart.
    pub fn insight_message(&self, habit: &Habit, insight: &PatternInsight) -> CoachingMessage {
        let charts = match insight.kind {
            PatternKind::DayPattern { .. } => vec![ChartKind::Heatmap],
            _ => vec![ChartKind::Trends],
        };
        let body = self.persona.render(&MessageContext::Insight {
            habit_name: habit.name.clone(),
            message: insight.message.clone(),
            kind: insight.kind.clone(),
        });
        CoachingMessage {
            habit_id: habit.id,
            message_type: MessageType::Insight,
            subject: format!("🔍 Insight: {}", habit.name),
            body,
            charts,
            priority: MessagePriority::Low,
        }
    }
}
