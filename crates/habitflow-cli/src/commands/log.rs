//! Log recording command for CLI.
//!
//! Writes one log per requested date, then recalculates and persists the
//! habit's streak counters so listings stay in sync.

use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Args;
use habitflow_core::storage::{HabitStore, LogStore};
use habitflow_core::{HabitLog, LogStatus, StreakCalculator};
use serde::Serialize;
use uuid::Uuid;

#[derive(Args)]
pub struct LogArgs {
    /// Habit ID
    #[arg(long)]
    pub habit_id: Uuid,
    /// Date to log (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Several dates at once, comma separated
    #[arg(long, value_delimiter = ',')]
    pub dates: Vec<NaiveDate>,
    /// Status: completed, partial, missed or skipped
    #[arg(long, default_value = "completed")]
    pub status: String,
    /// Recorded count (defaults to the habit's target for completions)
    #[arg(long)]
    pub count: Option<u32>,
    /// Free-form note
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Serialize)]
struct LogSummary {
    habit_id: Uuid,
    logged_dates: Vec<NaiveDate>,
    status: LogStatus,
    current_streak: u32,
    longest_streak: u32,
}

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let habits = HabitStore::open()?;
    let logs = LogStore::open()?;
    let habit = habits.find(args.habit_id)?;
    let status: LogStatus = args.status.parse()?;
    let today = Utc::now().date_naive();

    let dates = if args.dates.is_empty() {
        vec![args.date.unwrap_or(today)]
    } else {
        args.dates
    };

    // A bare `log` marks the full target done; misses record zero unless
    // a count says otherwise.
    let default_count = match status {
        LogStatus::Completed => habit.target_count,
        _ => 0,
    };

    for &day in &dates {
        let log = HabitLog {
            id: Uuid::new_v4(),
            habit_id: habit.id,
            user_id: habit.user_id.clone(),
            log_date: day.and_time(NaiveTime::MIN).and_utc(),
            status,
            actual_count: args.count.unwrap_or(default_count),
            target_count: Some(habit.target_count),
            unit: habit.target_unit.clone(),
            notes: args.notes.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        logs.upsert(log)?;
    }

    let history = logs.load_all(habit.id)?;
    let info = StreakCalculator::new().calculate(&habit, &history, today);
    habits.update(habit.id, |h| {
        h.current_streak = info.current_streak;
        h.longest_streak = info.longest_streak;
    })?;

    let summary = LogSummary {
        habit_id: habit.id,
        logged_dates: dates,
        status,
        current_streak: info.current_streak,
        longest_streak: info.longest_streak,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
