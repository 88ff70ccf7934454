//! Habit and habit-log domain model.
//!
//! These types mirror the on-disk records: habits live in a single JSON
//! document, logs in per-habit JSONL files (see [`crate::storage`]).
//! Raw logs are append-heavy and may contain several entries for the same
//! calendar day; the completion reducer collapses them before any
//! streak or insight computation runs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a habit is expected to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitFrequency {
    Daily,
    Weekly,
    Monthly,
    /// Specific weekdays or a custom interval, described by
    /// [`CustomFrequencyConfig`].
    Custom,
}

impl HabitFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekly => "weekly",
            HabitFrequency::Monthly => "monthly",
            HabitFrequency::Custom => "custom",
        }
    }
}

impl fmt::Display for HabitFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(HabitFrequency::Daily),
            "weekly" => Ok(HabitFrequency::Weekly),
            "monthly" => Ok(HabitFrequency::Monthly),
            "custom" => Ok(HabitFrequency::Custom),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// Life area a habit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Health,
    Fitness,
    Productivity,
    Learning,
    Social,
    Creative,
    Mindfulness,
    Spirituality,
    Other,
}

impl HabitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Health => "health",
            HabitCategory::Fitness => "fitness",
            HabitCategory::Productivity => "productivity",
            HabitCategory::Learning => "learning",
            HabitCategory::Social => "social",
            HabitCategory::Creative => "creative",
            HabitCategory::Mindfulness => "mindfulness",
            HabitCategory::Spirituality => "spirituality",
            HabitCategory::Other => "other",
        }
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "health" => Ok(HabitCategory::Health),
            "fitness" => Ok(HabitCategory::Fitness),
            "productivity" => Ok(HabitCategory::Productivity),
            "learning" => Ok(HabitCategory::Learning),
            "social" => Ok(HabitCategory::Social),
            "creative" => Ok(HabitCategory::Creative),
            "mindfulness" => Ok(HabitCategory::Mindfulness),
            "spirituality" => Ok(HabitCategory::Spirituality),
            "other" => Ok(HabitCategory::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Outcome recorded for a single log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Completed,
    Partial,
    Missed,
    /// Deliberately not done (rest day, travel). Counts as not completed
    /// unless the recorded count reaches the target.
    Skipped,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Completed => "completed",
            LogStatus::Partial => "partial",
            LogStatus::Missed => "missed",
            LogStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(LogStatus::Completed),
            "partial" => Ok(LogStatus::Partial),
            "missed" => Ok(LogStatus::Missed),
            "skipped" => Ok(LogStatus::Skipped),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Schedule details for [`HabitFrequency::Custom`] habits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomFrequencyConfig {
    /// Weekdays the habit applies to (0 = Sunday .. 6 = Saturday).
    #[serde(default)]
    pub days: Vec<u8>,
    /// Repeat every N days instead of specific weekdays.
    #[serde(default)]
    pub interval: Option<u32>,
    /// Dates the schedule explicitly does not apply to.
    #[serde(default)]
    pub exceptions: Vec<NaiveDate>,
}

/// Reminder preferences attached to a habit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Times of day in "HH:MM" form.
    #[serde(default)]
    pub times: Vec<String>,
    /// Custom reminder text; personas fill in a default when absent.
    #[serde(default)]
    pub message: Option<String>,
    /// Delivery channel hint ("email", "sms", "last").
    #[serde(default)]
    pub channel: Option<String>,
    /// Channel-specific address override.
    #[serde(default)]
    pub to: Option<String>,
}

/// A tracked habit.
///
/// `current_streak` and `longest_streak` are denormalized copies of the
/// latest streak computation, written back whenever logs change so that
/// listings do not need to re-read log files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    /// Owner of the habit; single-user installs use the configured default.
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: HabitCategory,
    pub frequency: HabitFrequency,
    /// Units per day that count as done (e.g. 8 glasses, 30 minutes).
    pub target_count: u32,
    /// Label for the target units ("glasses", "minutes", "session").
    pub target_unit: Option<String>,
    /// Present only for custom-frequency habits.
    pub custom_frequency: Option<CustomFrequencyConfig>,
    pub reminders: Option<ReminderSettings>,
    /// Archived habits keep their history but drop out of active listings.
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
    /// Set when the habit is archived.
    pub end_date: Option<NaiveDate>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One recorded observation of a habit.
///
/// Several logs may land on the same calendar day (corrections, duplicate
/// submissions). The reducer in [`crate::completion`] keeps only the most
/// recently created entry per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: String,
    /// The day being reported on. Stored as a full timestamp; reduction
    /// buckets by its UTC calendar date.
    pub log_date: DateTime<Utc>,
    pub status: LogStatus,
    pub actual_count: u32,
    /// Target at the time of logging; the habit's target may change later.
    pub target_count: Option<u32>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    /// When the entry was written. Later writes for the same day win.
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_round_trips_through_strings() {
        for freq in [
            HabitFrequency::Daily,
            HabitFrequency::Weekly,
            HabitFrequency::Monthly,
            HabitFrequency::Custom,
        ] {
            assert_eq!(freq.as_str().parse::<HabitFrequency>().unwrap(), freq);
        }
        assert!("hourly".parse::<HabitFrequency>().is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Completed".parse::<LogStatus>().unwrap(), LogStatus::Completed);
        assert_eq!("MISSED".parse::<LogStatus>().unwrap(), LogStatus::Missed);
        assert!("done".parse::<LogStatus>().is_err());
    }

    #[test]
    fn test_category_serializes_to_snake_case() {
        let json = serde_json::to_string(&HabitCategory::Mindfulness).unwrap();
        assert_eq!(json, "\"mindfulness\"");
        let back: HabitCategory = serde_json::from_str("\"fitness\"").unwrap();
        assert_eq!(back, HabitCategory::Fitness);
    }

    #[test]
    fn test_habit_log_optional_fields_default_to_none() {
        let json = r#"{
            "id": "a9f3b2c1-0000-0000-0000-000000000001",
            "habit_id": "a9f3b2c1-0000-0000-0000-000000000002",
            "user_id": "default-user",
            "log_date": "2026-01-15T00:00:00Z",
            "status": "completed",
            "actual_count": 1,
            "created_at": "2026-01-15T08:00:00Z"
        }"#;
        let log: HabitLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.target_count, None);
        assert_eq!(log.notes, None);
        assert_eq!(log.updated_at, None);
    }
}
