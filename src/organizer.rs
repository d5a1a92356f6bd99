//! Sorting, grouping, and search filtering for task lists.
//!
//! The flat working set is sorted first, then bucketed by category into an
//! ordered view model. Section order is always lexicographic on category
//! name regardless of the sort criteria; within a section tasks keep the
//! order the sort produced.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::task::{format_due_date, Task};

/// Sort criteria for the flat task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriteria {
    #[default]
    DueDate,
    Priority,
    Category,
}

impl SortCriteria {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due" | "duedate" | "due-date" => Ok(SortCriteria::DueDate),
            "priority" => Ok(SortCriteria::Priority),
            "category" => Ok(SortCriteria::Category),
            other => Err(Error::InvalidArgument(format!(
                "unknown sort criteria '{other}' (expected due, priority, or category)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortCriteria::DueDate => "due",
            SortCriteria::Priority => "priority",
            SortCriteria::Category => "category",
        }
    }
}

/// One display section: a category name and its tasks in display order
#[derive(Debug, Clone, Serialize)]
pub struct TaskSection {
    pub category: String,
    pub tasks: Vec<Task>,
}

/// Presentation-ready grouped view of the working set
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedTasks {
    pub sections: Vec<TaskSection>,
}

impl GroupedTasks {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|section| section.category.as_str())
            .collect()
    }

    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|section| section.tasks.len()).sum()
    }
}

/// Sort the flat collection in place.
///
/// All three orderings are stable, so ties keep their original relative
/// order. A task with no due date sorts as if due at `now`; priority sorts
/// on the raw numeric code, which puts None(0) first.
pub fn sort_tasks(tasks: &mut [Task], criteria: SortCriteria, now: NaiveDateTime) {
    match criteria {
        SortCriteria::DueDate => {
            // Only the date takes part in the ordering; same-day tasks are
            // ties and keep their original relative order.
            tasks.sort_by_key(|task| {
                task.due_date
                    .map(|date| date.and_time(chrono::NaiveTime::MIN))
                    .unwrap_or(now)
            });
        }
        SortCriteria::Priority => {
            tasks.sort_by_key(|task| task.priority.code());
        }
        SortCriteria::Category => {
            tasks.sort_by(|a, b| a.category_key().cmp(b.category_key()));
        }
    }
}

/// Sort and group the working set into the display view model.
pub fn organize(tasks: &[Task], criteria: SortCriteria, now: NaiveDateTime) -> GroupedTasks {
    let mut sorted: Vec<Task> = tasks.to_vec();
    sort_tasks(&mut sorted, criteria, now);

    let mut buckets: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in sorted {
        buckets
            .entry(task.category_key().to_string())
            .or_default()
            .push(task);
    }

    GroupedTasks {
        sections: buckets
            .into_iter()
            .map(|(category, tasks)| TaskSection { category, tasks })
            .collect(),
    }
}

/// Case-insensitive substring search across the displayable fields.
///
/// An empty query matches everything. Priority matches on both the numeric
/// code and the name; the due date matches on its short formatted form.
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
    {
        return true;
    }
    if let Some(category) = task.category.as_ref() {
        if category.name().to_lowercase().contains(&needle) {
            return true;
        }
    }
    if let Some(date) = task.due_date {
        if format_due_date(date).contains(&needle) {
            return true;
        }
    }
    task.priority.code().to_string().contains(&needle)
        || task.priority.name().to_lowercase().contains(&needle)
}

/// Restrict the working set to tasks matching the query.
pub fn filter_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| matches_query(task, query))
        .cloned()
        .collect()
}
