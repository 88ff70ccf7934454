//! Statistics commands for CLI.

use chrono::Utc;
use clap::Args;
use habitflow_core::stats::{completion_rates, CompletionRateResult};
use habitflow_core::storage::{HabitStore, LogStore};
use habitflow_core::{Habit, HabitStatistics, StatsCalculator};
use serde::Serialize;
use uuid::Uuid;

#[derive(Args)]
pub struct StatsArgs {
    /// Habit ID
    #[arg(long)]
    pub habit_id: Option<Uuid>,
    /// Report on every active habit
    #[arg(long)]
    pub all: bool,
    /// Trailing window in days
    #[arg(long, default_value = "30")]
    pub period: u32,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: HabitStatistics,
    /// Status breakdown over the whole history, not just the period.
    rates: CompletionRateResult,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let habits = HabitStore::open()?;
    let logs = LogStore::open()?;
    let today = Utc::now().date_naive();
    let calc = StatsCalculator::with_period(args.period);

    let selected: Vec<Habit> = match (args.habit_id, args.all) {
        (Some(id), false) => vec![habits.find(id)?],
        (None, true) => habits.load()?.into_iter().filter(|h| h.is_active).collect(),
        (Some(_), true) => return Err("pass either --habit-id or --all, not both".into()),
        (None, false) => return Err("pass --habit-id or --all".into()),
    };

    let mut reports = Vec::new();
    for habit in &selected {
        let history = logs.load_all(habit.id)?;
        reports.push(StatsReport {
            stats: calc.summarize(habit, &history, today),
            rates: completion_rates(&history),
        });
    }

    if args.habit_id.is_some() {
        if let Some(report) = reports.first() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
