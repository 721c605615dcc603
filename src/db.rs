//! Task store and its persistence, plus date helpers used by the UI.
//!
//! `TaskStore` owns the authoritative list of tasks. Every mutation writes
//! the whole list back to the storage slot; load and save failures are
//! logged and never stop the session.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{StorageError, TaskError};
use crate::fields::SeedMode;
use crate::seed::seed_tasks;
use crate::storage::Storage;
use crate::task::{Task, TaskDraft};
use crate::validate;

/// Fixed key the task list is saved under.
pub const TASKS_STORAGE_KEY: &str = "task_management_app_tasks";

/// How the initial task list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Saved,
    Seed,
}

/// In-memory task list synchronised to a storage slot.
pub struct TaskStore {
    tasks: Vec<Task>,
    backend: Box<dyn Storage>,
    source: LoadSource,
    unsaved: bool,
}

impl TaskStore {
    /// Load the saved task list, falling back to `seed` when the slot is
    /// missing, unreadable or malformed.
    pub fn open(backend: Box<dyn Storage>, seed: SeedMode) -> Self {
        let location = backend.describe(TASKS_STORAGE_KEY);
        let (tasks, source) = match load_tasks(backend.as_ref()) {
            Ok(Some(tasks)) => {
                tracing::info!(count = tasks.len(), %location, "loaded saved tasks");
                (tasks, LoadSource::Saved)
            }
            Ok(None) => {
                tracing::info!(%location, ?seed, "no saved tasks, using seed data");
                (seed_tasks(seed), LoadSource::Seed)
            }
            Err(e) => {
                tracing::warn!(error = %e, %location, ?seed, "failed to load tasks, using seed data");
                (seed_tasks(seed), LoadSource::Seed)
            }
        };
        TaskStore {
            tasks,
            backend,
            source,
            unsaved: false,
        }
    }

    /// Whether the tasks came from the saved slot or the seed set.
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// True when the most recent write failed and memory is ahead of storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// All tasks in insertion order.
    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Validate `draft`, give it a fresh id and append it.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<Task, TaskError> {
        let task = validate::accept(draft, self.next_id()).map_err(TaskError::Validation)?;
        tracing::info!(id = task.id, title = %task.title, "task created");
        self.tasks.push(task.clone());
        self.sync();
        Ok(task)
    }

    /// Replace the stored task with the same id.
    pub fn update(&mut self, task: Task) -> Result<(), TaskError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(TaskError::NotFound { id: task.id })?;
        tracing::info!(id = task.id, title = %task.title, "task updated");
        *slot = task;
        self.sync();
        Ok(())
    }

    /// Remove the task with `id`. Absent ids are ignored.
    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(idx);
        tracing::info!(id, title = %removed.title, "task deleted");
        self.sync();
        Some(removed)
    }

    /// Write the full list to storage. Failures are logged, not returned.
    fn sync(&mut self) {
        let result = encode_tasks(&self.tasks)
            .and_then(|raw| self.backend.write(TASKS_STORAGE_KEY, &raw));
        match result {
            Ok(()) => {
                if self.unsaved {
                    tracing::info!("task storage writable again, changes saved");
                }
                self.unsaved = false;
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    location = %self.backend.describe(TASKS_STORAGE_KEY),
                    count = self.tasks.len(),
                    "failed to save tasks; changes are held in memory only and will be lost on exit"
                );
                self.unsaved = true;
            }
        }
    }
}

/// Read and decode the task slot. `Ok(None)` means the slot was never written.
pub fn load_tasks(backend: &dyn Storage) -> Result<Option<Vec<Task>>, StorageError> {
    match backend.read(TASKS_STORAGE_KEY)? {
        Some(raw) => decode_tasks(&raw).map(Some),
        None => Ok(None),
    }
}

/// Decode a saved slot. Rejects anything that is not an array of tasks with
/// distinct ids.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, StorageError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(StorageError::Decode)?;
    if !value.is_array() {
        return Err(StorageError::NotAnArray);
    }
    let tasks: Vec<Task> = serde_json::from_value(value).map_err(StorageError::Decode)?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(StorageError::DuplicateId(task.id));
        }
    }
    Ok(tasks)
}

/// Encode tasks in the saved slot format.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    serde_json::to_string(tasks).map_err(StorageError::Encode)
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow"
/// - "monday" .. "sunday", "next monday", "this friday"
/// - "end of week", "end of month"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "end of week" | "eow" => {
            let weekday = today.weekday().num_days_from_monday() as i64;
            return Some(today + Duration::days(6 - weekday));
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        // offsets too large for a calendar date are unreadable, not fatal
        if let Some(n) = rest.strip_suffix('d') {
            if let Ok(days) = n.trim().parse::<i64>() {
                return Duration::try_days(days).and_then(|d| today.checked_add_signed(d));
            }
        }
        if let Some(n) = rest.strip_suffix('w') {
            if let Ok(weeks) = n.trim().parse::<i64>() {
                return Duration::try_weeks(weeks).and_then(|d| today.checked_add_signed(d));
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let current = today.weekday().num_days_from_monday() as i64;
    for (name, target) in weekdays {
        let ahead = (target + 7 - current) % 7;
        if s == name || s == format!("this {name}") {
            return Some(today + Duration::days(ahead));
        }
        if s == format!("next {name}") {
            let days = if ahead == 0 { 7 } else { ahead + 7 };
            return Some(today + Duration::days(days));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date as `M/D/YYYY`.
pub fn format_due_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
