//! Form validation and persistence orchestration.
//!
//! The editor turns a filled form into a repository call: validation
//! failures never touch the store, and a store failure leaves the caller's
//! view of the task untouched.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};
use crate::place::Place;
use crate::store::{TaskDraft, TaskPatch, TaskStore};
use crate::task::{Category, Priority, Task};

/// The fields a task form holds.
///
/// In edit mode, `None` means the form leaves that field untouched.
/// The exception is `priority`: the form always carries one (its unset
/// state is `Priority::None`), so it is always written through.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub place: Option<Place>,
    pub priority: Priority,
    pub category: Option<Category>,
}

/// Whether the form creates a new task or edits an existing one
#[derive(Debug, Clone)]
pub enum SubmitMode {
    Create,
    Edit { id: String },
}

/// Validate the form and persist it through the repository.
pub fn submit(store: &TaskStore, form: TaskForm, mode: SubmitMode) -> Result<Task> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(Error::TitleRequired);
    }

    match mode {
        SubmitMode::Create => {
            let description = form.description.ok_or_else(|| {
                Error::InvalidArgument("description must be present (it may be empty)".to_string())
            })?;
            store.create(TaskDraft {
                title: title.to_string(),
                description,
                due_date: form.due_date,
                due_time: form.due_time,
                place: form.place,
                priority: form.priority,
                category: Some(form.category.unwrap_or(Category::Other)),
            })
        }
        SubmitMode::Edit { id } => store.update(
            &id,
            TaskPatch {
                title: Some(title.to_string()),
                description: form.description,
                due_date: form.due_date,
                due_time: form.due_time,
                place: form.place,
                priority: form.priority,
                category: form.category,
            },
        ),
    }
}
