//! Command implementations for the HabitFlow CLI.

pub mod coach;
pub mod config;
pub mod habit;
pub mod log;
pub mod stats;
pub mod streaks;
