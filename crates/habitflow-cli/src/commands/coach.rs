//! Coaching commands for CLI.
//!
//! Runs the insight detectors and renders the results in the configured
//! persona's voice. Nothing is delivered anywhere; the output is a dry
//! run of what a delivery layer would send.

use chrono::Utc;
use clap::Args;
use habitflow_core::coach::WeeklyStats;
use habitflow_core::insight::{assess_risk, detect_milestone, detect_patterns};
use habitflow_core::storage::{HabitStore, LogStore, UserConfig};
use habitflow_core::{CoachingEngine, CoachingMessage, Habit, StreakCalculator};
use uuid::Uuid;

#[derive(Args)]
pub struct CoachArgs {
    /// Habit ID (default: every active habit)
    #[arg(long)]
    pub habit_id: Option<Uuid>,
    /// Check for milestone celebrations
    #[arg(long)]
    pub check_milestones: bool,
    /// Check for at-risk streaks
    #[arg(long)]
    pub check_risks: bool,
    /// Generate weekly check-ins
    #[arg(long)]
    pub weekly_checkin: bool,
    /// Detect behavior patterns
    #[arg(long)]
    pub detect_insights: bool,
    /// Output format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub fn run(args: CoachArgs) -> Result<(), Box<dyn std::error::Error>> {
    let habits = HabitStore::open()?;
    let logs = LogStore::open()?;
    let config = UserConfig::load_or_default();
    let engine = CoachingEngine::new(config.active_persona);
    let today = Utc::now().date_naive();

    // With no explicit checks requested, run everything except the weekly
    // check-in, which only makes sense on its own schedule.
    let run_all = !args.check_milestones
        && !args.check_risks
        && !args.weekly_checkin
        && !args.detect_insights;
    let check_milestones = args.check_milestones || run_all;
    let check_risks = args.check_risks || run_all;
    let detect_insights = args.detect_insights || run_all;

    let selected: Vec<Habit> = match args.habit_id {
        Some(id) => vec![habits.find(id)?],
        None => habits.load()?.into_iter().filter(|h| h.is_active).collect(),
    };

    let mut messages: Vec<CoachingMessage> = Vec::new();
    for mut habit in selected {
        let history = logs.load_all(habit.id)?;

        // Milestones read the stored counters, so refresh them first.
        let info = StreakCalculator::new().calculate(&habit, &history, today);
        habit.current_streak = info.current_streak;
        habit.longest_streak = info.longest_streak;

        if check_milestones {
            if let Some(milestone) = detect_milestone(&habit) {
                messages.push(engine.milestone_message(&habit, &milestone));
            }
        }
        if check_risks {
            let risk = assess_risk(&habit, &history, today);
            if let Some(message) = engine.risk_warning(&habit, &risk) {
                messages.push(message);
            }
        }
        if args.weekly_checkin {
            let stats = WeeklyStats::from_logs(&history, today);
            messages.push(engine.weekly_checkin(&habit, &stats));
        }
        if detect_insights {
            for insight in detect_patterns(&habit, &history, today) {
                messages.push(engine.insight_message(&habit, &insight));
            }
        }
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    println!("🔍 DRY RUN - Messages that would be sent:");
    println!();
    for message in &messages {
        println!("{}", "=".repeat(60));
        println!("📬 {}", message.subject);
        println!(
            "   type: {} | priority: {}",
            message.message_type.as_str(),
            message.priority.as_str()
        );
        println!("{}", "=".repeat(60));
        println!("{}", message.body);
        println!();
    }
    println!("Total messages: {}", messages.len());
    Ok(())
}
