mod config;
pub mod habits;
pub mod logs;

pub use config::UserConfig;
pub use habits::HabitStore;
pub use logs::LogStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/habitflow[-dev]/` based on HABITFLOW_ENV.
///
/// Set HABITFLOW_ENV=dev to use the development data directory, or
/// HABITFLOW_DATA_DIR to point at an explicit directory (tests and
/// scripted setups use this).
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(custom) = std::env::var("HABITFLOW_DATA_DIR") {
        let dir = PathBuf::from(custom);
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitflow-dev")
    } else {
        base_dir.join("habitflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
