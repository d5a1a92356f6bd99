//! Task repository over the `tasks.json` snapshot.
//!
//! Each operation takes the snapshot lock, applies its change, and writes
//! the whole file atomically, so a call either fully commits or fully
//! fails. Task ids are `<prefix>-<suffix>` where the suffix comes from the
//! random section of a fresh ULID; the CLI accepts unambiguous partial ids.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::IdConfig;
use crate::error::{Error, Result};
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::place::Place;
use crate::storage::Storage;
use crate::task::{Category, Priority, Task};

const TASKS_SCHEMA_VERSION: &str = "tm.tasks.v1";
const ULID_TIME_LEN: usize = 10;
const ULID_RANDOM_LEN: usize = 16;

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub place: Option<Place>,
    pub priority: Priority,
    pub category: Option<Category>,
}

/// Partial update: `None` leaves a field unchanged, except `priority`,
/// which is always written.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub place: Option<Place>,
    pub priority: Priority,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TasksFile {
    schema_version: String,
    tasks: Vec<Task>,
}

impl TasksFile {
    fn empty() -> Self {
        Self {
            schema_version: TASKS_SCHEMA_VERSION.to_string(),
            tasks: Vec::new(),
        }
    }
}

/// Repository owning all persisted tasks
#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
    ids: IdConfig,
}

impl TaskStore {
    pub fn new(storage: Storage, ids: IdConfig) -> Self {
        Self { storage, ids }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// All persisted tasks, in creation order
    pub fn fetch_all(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.tasks)
    }

    /// A single task by exact id
    pub fn get(&self, id: &str) -> Result<Task> {
        self.load()?
            .tasks
            .into_iter()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// Persist a new task and return it with its assigned id
    pub fn create(&self, draft: TaskDraft) -> Result<Task> {
        self.mutate(|tasks| {
            let existing: HashSet<String> = tasks.iter().map(|task| task.id.clone()).collect();
            let id = generate_id(&self.ids, &existing);
            let now = Utc::now();
            let task = Task {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                due_date: draft.due_date,
                due_time: draft.due_time,
                place: draft.place.clone(),
                priority: draft.priority,
                category: draft.category.clone(),
                is_complete: false,
                created_at: now,
                updated_at: now,
            };
            tasks.push(task.clone());
            Ok(task)
        })
    }

    /// Apply a partial update and return the updated task
    pub fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.mutate(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

            if let Some(title) = patch.title.clone() {
                task.title = title;
            }
            if let Some(description) = patch.description.clone() {
                task.description = description;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(due_time) = patch.due_time {
                task.due_time = Some(due_time);
            }
            if let Some(place) = patch.place.clone() {
                task.place = Some(place);
            }
            if let Some(category) = patch.category.clone() {
                task.category = Some(category);
            }
            // Priority is not optional in the form; an update always
            // carries it, so it is always overwritten.
            task.priority = patch.priority;
            task.updated_at = Utc::now();
            Ok(task.clone())
        })
    }

    /// Flip the completion flag and return the updated task
    pub fn toggle_complete(&self, id: &str) -> Result<Task> {
        self.mutate(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            task.is_complete = !task.is_complete;
            task.updated_at = Utc::now();
            Ok(task.clone())
        })
    }

    /// Remove a task
    pub fn delete(&self, id: &str) -> Result<()> {
        self.mutate(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id != id);
            if tasks.len() == before {
                return Err(Error::TaskNotFound(id.to_string()));
            }
            Ok(())
        })
    }

    /// Resolve user input to a full task id.
    ///
    /// Accepts the exact id, the exact suffix, or any unambiguous suffix
    /// prefix, case-insensitively.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let trimmed = input.trim().to_ascii_lowercase();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }
        let candidate = suffix_of(&trimmed);

        let tasks = self.fetch_all()?;
        let mut exact: Vec<String> = Vec::new();
        let mut partial: Vec<String> = Vec::new();

        for task in &tasks {
            let id_norm = task.id.to_ascii_lowercase();
            let suffix = suffix_of(&id_norm);
            if id_norm == trimmed || suffix == trimmed {
                exact.push(task.id.clone());
                continue;
            }
            if suffix.starts_with(candidate) {
                partial.push(task.id.clone());
            }
        }

        if exact.len() == 1 {
            return Ok(exact.remove(0));
        }
        if exact.len() > 1 {
            return Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                input.trim(),
                exact.join(", ")
            )));
        }

        partial.sort();
        partial.dedup();
        match partial.len() {
            0 => Err(Error::TaskNotFound(input.trim().to_string())),
            1 => Ok(partial.remove(0)),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                input.trim(),
                partial.join(", ")
            ))),
        }
    }

    fn load(&self) -> Result<TasksFile> {
        let path = self.storage.tasks_file();
        if !path.exists() {
            return Ok(TasksFile::empty());
        }
        self.storage.read_json(&path)
    }

    fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T>,
    {
        self.storage.init()?;
        let path = self.storage.tasks_file();
        let lock_path = path.with_extension("lock");
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut file = self.load()?;
        let result = f(&mut file.tasks)?;
        self.storage.write_json(&path, &file)?;
        Ok(result)
    }
}

fn suffix_of(id: &str) -> &str {
    match id.find('-') {
        Some(idx) if idx + 1 < id.len() => &id[idx + 1..],
        _ => id,
    }
}

/// Pick a fresh `<prefix>-<suffix>` id, growing the suffix when the short
/// form collides with an existing task.
fn generate_id(config: &IdConfig, existing: &HashSet<String>) -> String {
    let existing_suffixes: HashSet<String> = existing
        .iter()
        .map(|id| suffix_of(&id.to_ascii_lowercase()).to_string())
        .collect();

    let mut len = config.min_len.clamp(1, ULID_RANDOM_LEN);
    loop {
        for _ in 0..8 {
            let base = Ulid::new().to_string().to_lowercase();
            let random = &base[ULID_TIME_LEN..ULID_TIME_LEN + ULID_RANDOM_LEN];
            let suffix = &random[..len];
            if !existing_suffixes.contains(suffix) {
                return format!("{}-{}", config.prefix.trim(), suffix);
            }
        }
        if len < ULID_RANDOM_LEN {
            len += 1;
        }
    }
}
