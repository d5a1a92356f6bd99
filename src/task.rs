//! Task entity and status derivation.
//!
//! A task is the persisted record; its status (Complete, Overdue, Pending)
//! is never stored and is recomputed from the due fields and the clock on
//! every read.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::place::Place;

/// Task priority, persisted as its numeric code.
///
/// The code ordering is the sort ordering: None(0) sorts before High(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i16", into = "i16")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    pub fn code(self) -> i16 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::None => 0,
        }
    }

    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Priority::High,
            2 => Priority::Medium,
            3 => Priority::Low,
            _ => Priority::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::None => "None",
        }
    }

    /// Parse a priority from user input: a name or a numeric code.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument(
                "priority cannot be empty".to_string(),
            ));
        }
        if let Ok(code) = trimmed.parse::<i16>() {
            if (0..=3).contains(&code) {
                return Ok(Priority::from_code(code));
            }
            return Err(Error::InvalidArgument(format!(
                "unknown priority '{trimmed}' (expected high, medium, low, none or 0-3)"
            )));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "none" => Ok(Priority::None),
            _ => Err(Error::InvalidArgument(format!(
                "unknown priority '{trimmed}' (expected high, medium, low, none or 0-3)"
            ))),
        }
    }
}

impl From<i16> for Priority {
    fn from(code: i16) -> Self {
        Priority::from_code(code)
    }
}

impl From<Priority> for i16 {
    fn from(priority: Priority) -> Self {
        priority.code()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Grouping label for display sectioning.
///
/// The well-known labels are enumerated; anything else passes through
/// unchanged as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Personal,
    Urgent,
    Study,
    Other,
    Custom(String),
}

impl Category {
    pub fn name(&self) -> &str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Urgent => "Urgent",
            Category::Study => "Study",
            Category::Other => "Other",
            Category::Custom(name) => name,
        }
    }

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "work" => Category::Work,
            "personal" => Category::Personal,
            "urgent" => Category::Urgent,
            "study" => Category::Study,
            "other" => Category::Other,
            _ => Category::Custom(trimmed.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived task status; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    Complete,
    Overdue,
    Pending,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskStatus::Complete => "Complete",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Pending => "Pending",
        };
        f.write_str(name)
    }
}

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Combined due instant, present only when both date and time are set.
    pub fn due_instant(&self) -> Option<NaiveDateTime> {
        match (self.due_date, self.due_time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }

    /// Derive the status at the given instant.
    ///
    /// A complete task is Complete no matter what its due fields say. A
    /// task missing either due field can never be Overdue.
    pub fn status_at(&self, now: NaiveDateTime) -> TaskStatus {
        if self.is_complete {
            return TaskStatus::Complete;
        }
        if let Some(due) = self.due_instant() {
            if due < now {
                return TaskStatus::Overdue;
            }
        }
        TaskStatus::Pending
    }

    /// Name of the grouping section this task belongs to; uncategorized
    /// tasks share the empty-string section.
    pub fn category_key(&self) -> &str {
        self.category.as_ref().map(Category::name).unwrap_or("")
    }
}

/// Short due-date form used in listings and search matching.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// Short due-time form used in listings.
pub fn format_due_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
