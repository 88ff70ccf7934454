//! JSON-file habit storage.
//!
//! All habits live in a single `habits.json` file under the data
//! directory, wrapped in a top-level object so the format can grow
//! fields later without a migration:
//!
//! ```json
//! { "habits": [ ... ] }
//! ```
//!
//! Every mutating method reads the file, applies the change and writes
//! the whole file back. At the scale of a personal habit list that is
//! simpler and safer than partial updates.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::data_dir;
use crate::error::StorageError;
use crate::habit::Habit;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HabitsFile {
    #[serde(default)]
    habits: Vec<Habit>,
}

/// File-backed store for habit definitions.
#[derive(Debug, Clone)]
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    /// Open the store at `<data_dir>/habits.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join("habits.json"),
        })
    }

    /// Open the store at an explicit file path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all habits. A missing file is an empty store, not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<Habit>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let file: HabitsFile =
            serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(file.habits)
    }

    /// Write the full habit list back to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let file = HabitsFile {
            habits: habits.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| StorageError::ParseFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Look up a single habit by id.
    ///
    /// # Errors
    /// Returns [`StorageError::HabitNotFound`] if no habit has that id.
    pub fn find(&self, id: Uuid) -> Result<Habit, StorageError> {
        self.load()?
            .into_iter()
            .find(|h| h.id == id)
            .ok_or(StorageError::HabitNotFound(id))
    }

    /// Append a new habit.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn add(&self, habit: Habit) -> Result<(), StorageError> {
        let mut habits = self.load()?;
        habits.push(habit);
        self.save(&habits)
    }

    /// Apply a mutation to one habit and persist it. `updated_at` is
    /// stamped after the closure runs, so callers never have to.
    ///
    /// # Errors
    /// Returns [`StorageError::HabitNotFound`] if no habit has that id,
    /// or a read/write error.
    pub fn update<F>(&self, id: Uuid, f: F) -> Result<Habit, StorageError>
    where
        F: FnOnce(&mut Habit),
    {
        let mut habits = self.load()?;
        let habit = habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StorageError::HabitNotFound(id))?;
        f(habit);
        habit.updated_at = Utc::now();
        let updated = habit.clone();
        self.save(&habits)?;
        Ok(updated)
    }

    /// Deactivate a habit without deleting its history.
    ///
    /// # Errors
    /// Returns [`StorageError::HabitNotFound`] if no habit has that id.
    pub fn archive(&self, id: Uuid, today: NaiveDate) -> Result<Habit, StorageError> {
        self.update(id, |habit| {
            habit.is_active = false;
            habit.end_date = Some(today);
        })
    }

    /// Remove a habit entirely, returning the removed definition.
    ///
    /// # Errors
    /// Returns [`StorageError::HabitNotFound`] if no habit has that id.
    pub fn remove(&self, id: Uuid) -> Result<Habit, StorageError> {
        let mut habits = self.load()?;
        let index = habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StorageError::HabitNotFound(id))?;
        let removed = habits.remove(index);
        self.save(&habits)?;
        Ok(removed)
    }
}
