//! Habit management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use habitflow_core::habit::{CustomFrequencyConfig, ReminderSettings};
use habitflow_core::storage::{HabitStore, LogStore, UserConfig};
use habitflow_core::{Habit, HabitCategory, HabitFrequency};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        /// Category: health, fitness, productivity, learning, social,
        /// creative, mindfulness, spirituality or other
        #[arg(long)]
        category: String,
        /// Frequency: daily, weekly, monthly or custom
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Habit description
        #[arg(long)]
        description: Option<String>,
        /// Units per day that count as done (default: 1)
        #[arg(long, default_value = "1")]
        target_count: u32,
        /// Label for the target units
        #[arg(long, default_value = "session")]
        target_unit: String,
        /// Weekdays for custom frequency, comma separated (0 = Sunday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
        /// Reminder times, comma separated "HH:MM"
        #[arg(long, value_delimiter = ',')]
        remind_at: Vec<String>,
        /// Custom reminder message
        #[arg(long)]
        remind_message: Option<String>,
        /// First day the habit applies (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// List habits
    List {
        /// Only active habits
        #[arg(long)]
        active: bool,
        /// Only archived habits
        #[arg(long)]
        archived: bool,
        /// Filter by a name substring, case insensitive
        #[arg(long)]
        search: Option<String>,
        /// Output format: text, markdown or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Get habit details
    Get {
        /// Habit ID
        id: Uuid,
    },
    /// Update a habit
    Update {
        /// Habit ID
        id: Uuid,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New frequency
        #[arg(long)]
        frequency: Option<String>,
        /// New target count
        #[arg(long)]
        target_count: Option<u32>,
        /// New target unit label
        #[arg(long)]
        target_unit: Option<String>,
    },
    /// Archive a habit, keeping its history
    Archive {
        /// Habit ID
        id: Uuid,
    },
    /// Delete a habit and all of its logs
    Delete {
        /// Habit ID
        id: Uuid,
        /// Required, deletion is permanent
        #[arg(long)]
        confirm: bool,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = HabitStore::open()?;

    match action {
        HabitAction::Create {
            name,
            category,
            frequency,
            description,
            target_count,
            target_unit,
            days,
            remind_at,
            remind_message,
            start_date,
        } => {
            let category: HabitCategory = category.parse()?;
            let frequency: HabitFrequency = frequency.parse()?;

            let custom_frequency = if frequency == HabitFrequency::Custom {
                Some(CustomFrequencyConfig {
                    days,
                    interval: None,
                    exceptions: Vec::new(),
                })
            } else {
                None
            };
            let reminders = if remind_at.is_empty() && remind_message.is_none() {
                None
            } else {
                Some(ReminderSettings {
                    enabled: true,
                    times: remind_at,
                    message: remind_message,
                    channel: None,
                    to: None,
                })
            };

            let now = Utc::now();
            let habit = Habit {
                id: Uuid::new_v4(),
                user_id: UserConfig::load_or_default().user_id,
                name,
                description,
                category,
                frequency,
                target_count,
                target_unit: Some(target_unit),
                custom_frequency,
                reminders,
                is_active: true,
                start_date,
                end_date: None,
                current_streak: 0,
                longest_streak: 0,
                created_at: now,
                updated_at: now,
            };
            store.add(habit.clone())?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List {
            active,
            archived,
            search,
            format,
        } => {
            let habits: Vec<Habit> = store
                .load()?
                .into_iter()
                .filter(|h| {
                    if active && !h.is_active {
                        return false;
                    }
                    if archived && h.is_active {
                        return false;
                    }
                    if let Some(ref needle) = search {
                        if !h.name.to_lowercase().contains(&needle.to_lowercase()) {
                            return false;
                        }
                    }
                    true
                })
                .collect();

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&habits)?),
                "markdown" => {
                    println!("| Habit | Category | Frequency | Streak | Status |");
                    println!("|---|---|---|---|---|");
                    for h in &habits {
                        let status = if h.is_active { "✅ active" } else { "📦 archived" };
                        println!(
                            "| {} | {} | {} | 🔥 {} | {} |",
                            h.name,
                            h.category.as_str(),
                            h.frequency.as_str(),
                            h.current_streak,
                            status
                        );
                    }
                }
                _ => {
                    for h in &habits {
                        let marker = if h.is_active { "" } else { "  (archived)" };
                        println!(
                            "🔥 {:>3}  {}  [{}/{}]{}",
                            h.current_streak,
                            h.name,
                            h.category.as_str(),
                            h.frequency.as_str(),
                            marker
                        );
                    }
                }
            }
        }
        HabitAction::Get { id } => {
            let habit = store.find(id)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Update {
            id,
            name,
            description,
            category,
            frequency,
            target_count,
            target_unit,
        } => {
            let category = category.map(|c| c.parse::<HabitCategory>()).transpose()?;
            let frequency = frequency.map(|f| f.parse::<HabitFrequency>()).transpose()?;

            let habit = store.update(id, |h| {
                if let Some(n) = name {
                    h.name = n;
                }
                if let Some(d) = description {
                    h.description = Some(d);
                }
                if let Some(c) = category {
                    h.category = c;
                }
                if let Some(f) = frequency {
                    h.frequency = f;
                    if f != HabitFrequency::Custom {
                        h.custom_frequency = None;
                    }
                }
                if let Some(t) = target_count {
                    h.target_count = t;
                }
                if let Some(u) = target_unit {
                    h.target_unit = Some(u);
                }
            })?;
            println!("Habit updated:");
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Archive { id } => {
            let habit = store.archive(id, Utc::now().date_naive())?;
            println!("Habit archived: {}", habit.id);
        }
        HabitAction::Delete { id, confirm } => {
            if !confirm {
                return Err("refusing to delete without --confirm".into());
            }
            let logs = LogStore::open()?;
            let removed = store.remove(id)?;
            logs.remove_all(id)?;
            println!("Habit deleted: {}", removed.id);
        }
    }
    Ok(())
}
