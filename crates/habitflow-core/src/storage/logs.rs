//! Append-oriented log storage.
//!
//! Logs are sharded into one JSON-lines file per habit per year,
//! `logs/<habit_id>_<year>.jsonl`, so the hot path (this year's file)
//! stays small no matter how long a habit has been tracked.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use uuid::Uuid;

use super::data_dir;
use crate::error::StorageError;
use crate::habit::HabitLog;

/// File-backed store for habit log entries.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    /// Open the store at `<data_dir>/logs/`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be resolved or created.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?)
    }

    /// Open the store under an explicit base directory; the `logs/`
    /// subdirectory is created if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open_at(base: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = base.as_ref().join("logs");
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::WriteFailed {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn year_path(&self, habit_id: Uuid, year: i32) -> PathBuf {
        self.dir.join(format!("{habit_id}_{year}.jsonl"))
    }

    /// Append one log entry to its year file.
    ///
    /// # Errors
    /// Returns an error if the entry cannot be serialized or written.
    pub fn append(&self, log: &HabitLog) -> Result<(), StorageError> {
        let path = self.year_path(log.habit_id, log.log_date.year());
        let line = serde_json::to_string(log).map_err(|e| StorageError::ParseFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
        writeln!(file, "{line}").map_err(|e| StorageError::WriteFailed { path, source: e })
    }

    /// Insert a log, replacing any existing entry for the same calendar
    /// day. The replaced entry keeps its id and `created_at`; only the
    /// observation fields change.
    ///
    /// # Errors
    /// Returns an error if the year file cannot be read or written.
    pub fn upsert(&self, log: HabitLog) -> Result<HabitLog, StorageError> {
        let year = log.log_date.year();
        let mut logs = self.load_year(log.habit_id, year)?;
        let day = log.log_date.date_naive();

        if let Some(existing) = logs.iter_mut().find(|l| l.log_date.date_naive() == day) {
            existing.log_date = log.log_date;
            existing.status = log.status;
            existing.actual_count = log.actual_count;
            existing.target_count = log.target_count;
            existing.unit = log.unit;
            existing.notes = log.notes;
            existing.updated_at = Some(Utc::now());
            let updated = existing.clone();
            self.write_year(log.habit_id, year, &logs)?;
            return Ok(updated);
        }

        self.append(&log)?;
        Ok(log)
    }

    /// Load one habit's logs for a single year. A missing file means no
    /// logs, not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_year(&self, habit_id: Uuid, year: i32) -> Result<Vec<HabitLog>, StorageError> {
        let path = self.year_path(habit_id, year);
        self.load_file(&path)
    }

    /// Load one habit's logs across every year on disk, oldest first.
    ///
    /// # Errors
    /// Returns an error if a year file cannot be read or parsed.
    pub fn load_all(&self, habit_id: Uuid) -> Result<Vec<HabitLog>, StorageError> {
        let prefix = format!("{habit_id}_");
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StorageError::ReadFailed {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut logs = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) && name.ends_with(".jsonl") {
                logs.extend(self.load_file(&entry.path())?);
            }
        }
        logs.sort_by_key(|l| l.log_date);
        Ok(logs)
    }

    /// Apply a mutation to one log entry and persist it. `updated_at` is
    /// stamped after the closure runs.
    ///
    /// # Errors
    /// Returns [`StorageError::LogNotFound`] if the year file has no
    /// entry with that id, or a read/write error.
    pub fn update<F>(
        &self,
        habit_id: Uuid,
        log_id: Uuid,
        year: i32,
        f: F,
    ) -> Result<HabitLog, StorageError>
    where
        F: FnOnce(&mut HabitLog),
    {
        let mut logs = self.load_year(habit_id, year)?;
        let log = logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .ok_or(StorageError::LogNotFound { habit_id, log_id })?;
        f(log);
        log.updated_at = Some(Utc::now());
        let updated = log.clone();
        self.write_year(habit_id, year, &logs)?;
        Ok(updated)
    }

    /// Delete every log file belonging to a habit.
    ///
    /// # Errors
    /// Returns an error if the directory scan or a file removal fails.
    pub fn remove_all(&self, habit_id: Uuid) -> Result<(), StorageError> {
        let prefix = format!("{habit_id}_");
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StorageError::ReadFailed {
            path: self.dir.clone(),
            source: e,
        })?;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) && name.ends_with(".jsonl") {
                std::fs::remove_file(entry.path()).map_err(|e| StorageError::WriteFailed {
                    path: entry.path(),
                    source: e,
                })?;
            }
        }
        Ok(())
    }

    fn load_file(&self, path: &Path) -> Result<Vec<HabitLog>, StorageError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| StorageError::ParseFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn write_year(&self, habit_id: Uuid, year: i32, logs: &[HabitLog]) -> Result<(), StorageError> {
        let path = self.year_path(habit_id, year);
        let mut content = String::new();
        for log in logs {
            let line = serde_json::to_string(log).map_err(|e| StorageError::ParseFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
            content.push_str(&line);
            content.push('\n');
        }
        std::fs::write(&path, content)
            .map_err(|e| StorageError::WriteFailed { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::LogStatus;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn make_log(habit_id: Uuid, y: i32, mo: u32, d: u32, status: LogStatus) -> HabitLog {
        let when = Utc.with_ymd_and_hms(y, mo, d, 9, 0, 0).unwrap();
        HabitLog {
            id: Uuid::new_v4(),
            habit_id,
            user_id: "default-user".to_string(),
            log_date: when,
            status,
            actual_count: u32::from(status == LogStatus::Completed),
            target_count: Some(1),
            unit: None,
            notes: None,
            created_at: when,
            updated_at: None,
        }
    }

    #[test]
    fn test_append_creates_year_file() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        let log = make_log(habit_id, 2026, 1, 10, LogStatus::Completed);
        store.append(&log).unwrap();

        let expected = dir.path().join("logs").join(format!("{habit_id}_2026.jsonl"));
        assert!(expected.exists());

        let loaded = store.load_year(habit_id, 2026).unwrap();
        assert_eq!(loaded, vec![log]);
    }

    #[test]
    fn test_load_missing_year_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        assert!(store.load_year(Uuid::new_v4(), 2026).unwrap().is_empty());
    }

    #[test]
    fn test_logs_shard_by_year() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        store
            .append(&make_log(habit_id, 2025, 12, 31, LogStatus::Completed))
            .unwrap();
        store
            .append(&make_log(habit_id, 2026, 1, 1, LogStatus::Completed))
            .unwrap();

        assert_eq!(store.load_year(habit_id, 2025).unwrap().len(), 1);
        assert_eq!(store.load_year(habit_id, 2026).unwrap().len(), 1);
    }

    #[test]
    fn test_load_all_spans_years_oldest_first() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        store
            .append(&make_log(habit_id, 2026, 1, 2, LogStatus::Missed))
            .unwrap();
        store
            .append(&make_log(habit_id, 2025, 12, 30, LogStatus::Completed))
            .unwrap();
        store
            .append(&make_log(other, 2026, 1, 2, LogStatus::Completed))
            .unwrap();

        let logs = store.load_all(habit_id).unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].log_date < logs[1].log_date);
        assert!(logs.iter().all(|l| l.habit_id == habit_id));
    }

    #[test]
    fn test_update_rewrites_entry() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        let log = make_log(habit_id, 2026, 1, 10, LogStatus::Missed);
        store.append(&log).unwrap();

        let updated = store
            .update(habit_id, log.id, 2026, |l| {
                l.status = LogStatus::Completed;
                l.actual_count = 1;
            })
            .unwrap();
        assert_eq!(updated.status, LogStatus::Completed);
        assert!(updated.updated_at.is_some());

        let reloaded = store.load_year(habit_id, 2026).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].status, LogStatus::Completed);
    }

    #[test]
    fn test_update_unknown_log_fails() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        store
            .append(&make_log(habit_id, 2026, 1, 10, LogStatus::Completed))
            .unwrap();

        let missing = Uuid::new_v4();
        let err = store
            .update(habit_id, missing, 2026, |_| {})
            .unwrap_err();
        assert!(matches!(err, StorageError::LogNotFound { log_id, .. } if log_id == missing));
    }

    #[test]
    fn test_upsert_replaces_same_day_entry() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        let first = make_log(habit_id, 2026, 1, 10, LogStatus::Completed);
        store.upsert(first.clone()).unwrap();

        let mut second = make_log(habit_id, 2026, 1, 10, LogStatus::Missed);
        second.notes = Some("travel day".to_string());
        let stored = store.upsert(second).unwrap();

        // Same calendar day, so the original entry is corrected in place.
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.created_at, first.created_at);
        assert_eq!(stored.status, LogStatus::Missed);
        assert_eq!(stored.notes.as_deref(), Some("travel day"));

        let logs = store.load_year(habit_id, 2026).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, LogStatus::Missed);
    }

    #[test]
    fn test_upsert_distinct_days_appends() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        store
            .upsert(make_log(habit_id, 2026, 1, 10, LogStatus::Completed))
            .unwrap();
        store
            .upsert(make_log(habit_id, 2026, 1, 11, LogStatus::Completed))
            .unwrap();
        assert_eq!(store.load_year(habit_id, 2026).unwrap().len(), 2);
    }

    #[test]
    fn test_remove_all_deletes_only_that_habit() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open_at(dir.path()).unwrap();
        let habit_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        store
            .append(&make_log(habit_id, 2025, 6, 1, LogStatus::Completed))
            .unwrap();
        store
            .append(&make_log(habit_id, 2026, 1, 1, LogStatus::Completed))
            .unwrap();
        store
            .append(&make_log(other, 2026, 1, 1, LogStatus::Completed))
            .unwrap();

        store.remove_all(habit_id).unwrap();
        assert!(store.load_all(habit_id).unwrap().is_empty());
        assert_eq!(store.load_all(other).unwrap().len(), 1);
    }
}
