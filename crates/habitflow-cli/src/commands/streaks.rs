//! Streak calculation commands for CLI.

use chrono::Utc;
use clap::Args;
use habitflow_core::storage::{HabitStore, LogStore};
use habitflow_core::{Habit, StreakCalculator, StreakInfo};
use serde::Serialize;
use uuid::Uuid;

#[derive(Args)]
pub struct StreaksArgs {
    /// Habit ID (default: every active habit)
    #[arg(long)]
    pub habit_id: Option<Uuid>,
    /// Observed missed days tolerated before the streak breaks
    #[arg(long, default_value = "1")]
    pub forgiveness_limit: u32,
    /// Write the recalculated streaks back to the habit store
    #[arg(long)]
    pub update: bool,
    /// Output format: json or text
    #[arg(long, default_value = "json")]
    pub format: String,
}

#[derive(Serialize)]
struct StreakReport {
    habit_id: Uuid,
    habit_name: String,
    streaks: StreakInfo,
}

pub fn run(args: StreaksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let habits = HabitStore::open()?;
    let logs = LogStore::open()?;
    let today = Utc::now().date_naive();
    let calc = StreakCalculator::with_forgiveness_limit(args.forgiveness_limit);

    let selected: Vec<Habit> = match args.habit_id {
        Some(id) => vec![habits.find(id)?],
        None => habits.load()?.into_iter().filter(|h| h.is_active).collect(),
    };

    let mut reports = Vec::new();
    for habit in &selected {
        let history = logs.load_all(habit.id)?;
        let info = calc.calculate(habit, &history, today);
        if args.update {
            habits.update(habit.id, |h| {
                h.current_streak = info.current_streak;
                h.longest_streak = info.longest_streak;
            })?;
        }
        reports.push(StreakReport {
            habit_id: habit.id,
            habit_name: habit.name.clone(),
            streaks: info,
        });
    }

    if args.format == "text" {
        for report in &reports {
            println!(
                "🔥 {:>3} (best {:>3})  {}  [{}]",
                report.streaks.current_streak,
                report.streaks.longest_streak,
                report.habit_name,
                report.streaks.streak_quality.as_str()
            );
        }
    } else if args.habit_id.is_some() {
        if let Some(report) = reports.first() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
