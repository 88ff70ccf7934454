//! # HabitFlow Core Library
//!
//! This library provides the core business logic for the HabitFlow habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any richer frontend being a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: Pure calculators that fold raw logs into daily
//!   completions, streaks and statistics; "today" is always an explicit
//!   argument so results are reproducible
//! - **Storage**: JSON-file habit and log stores and TOML-based configuration
//! - **Insights**: Risk scoring, milestone detection and behavior patterns
//! - **Coaching**: Persona-voiced messages built from insight results
//!
//! ## Key Components
//!
//! - [`StreakCalculator`]: Streak and forgiveness accounting
//! - [`StatsCalculator`]: Period statistics and trends
//! - [`CoachingEngine`]: Coaching message generation
//! - [`HabitStore`] / [`LogStore`]: Habit and log persistence

pub mod habit;
pub mod completion;
pub mod streak;
pub mod insight;
pub mod stats;
pub mod coach;
pub mod storage;
pub mod error;

pub use habit::{Habit, HabitCategory, HabitFrequency, HabitLog, LogStatus};
pub use completion::{reduce_to_daily, DailyCompletion};
pub use streak::{StreakCalculator, StreakInfo, StreakQuality, StreakType};
pub use insight::{MilestoneDetection, PatternInsight, PatternKind, RiskAssessment};
pub use stats::{HabitStatistics, StatsCalculator, Trend};
pub use coach::{CoachingEngine, CoachingMessage, Persona, WeeklyStats};
pub use storage::{HabitStore, LogStore, UserConfig};
pub use error::{ConfigError, CoreError, StorageError};
