//! Notification requests for external delivery.
//!
//! The core never delivers notifications itself; it emits schedule/cancel
//! requests as JSON lines to stdout or a configured file, and a delivery
//! agent outside this crate picks them up. Request identifiers derive from
//! the task id, so rescheduling and cancellation stay idempotent per task.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Task, TaskStatus};

pub const NOTIFY_SCHEMA_VERSION: &str = "tm.notify.v1";

/// Notification identifier for a task
pub fn notification_id(task_id: &str) -> String {
    format!("task:{task_id}")
}

/// Where notification requests are written
#[derive(Debug, Clone)]
pub enum NotifyDestination {
    Stdout,
    File(PathBuf),
}

impl NotifyDestination {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed == "-" {
            return Some(NotifyDestination::Stdout);
        }
        Some(NotifyDestination::File(PathBuf::from(trimmed)))
    }

    pub fn open(&self) -> Result<JsonlNotifier> {
        match self {
            NotifyDestination::Stdout => Ok(JsonlNotifier::stdout()),
            NotifyDestination::File(path) => JsonlNotifier::file(path),
        }
    }
}

/// When a scheduled notification fires
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fire at a wall-clock instant; repeating triggers fire daily until
    /// cancelled.
    Calendar { at: NaiveDateTime, repeats: bool },
    /// Fire after a delay from now.
    Interval { seconds: u64 },
}

/// A single schedule request
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRequest {
    pub schema_version: &'static str,
    pub id: String,
    pub title: String,
    pub body: String,
    pub trigger: Trigger,
    pub requested_at: DateTime<Utc>,
}

impl NotificationRequest {
    /// Reminder for a task's due instant.
    ///
    /// Returns `None` unless both due fields are set. An overdue task gets
    /// an "Overdue: "-prefixed body and a repeating trigger; a pending one
    /// fires once at its due instant.
    pub fn due_reminder(task: &Task, status: TaskStatus) -> Option<Self> {
        let due = task.due_instant()?;
        let description = if task.description.is_empty() {
            "No description available"
        } else {
            task.description.as_str()
        };
        let (body, repeats) = if status == TaskStatus::Overdue {
            (format!("Overdue: {description}"), true)
        } else {
            (description.to_string(), false)
        };
        Some(Self {
            schema_version: NOTIFY_SCHEMA_VERSION,
            id: notification_id(&task.id),
            title: task.title.clone(),
            body,
            trigger: Trigger::Calendar { at: due, repeats },
            requested_at: Utc::now(),
        })
    }

    /// Alert for a task whose place is near the user's location.
    pub fn nearby_alert(task: &Task) -> Self {
        Self {
            schema_version: NOTIFY_SCHEMA_VERSION,
            id: notification_id(&task.id),
            title: "You're near a task!".to_string(),
            body: format!("Reminder: {} is near you.", task.title),
            trigger: Trigger::Interval { seconds: 1 },
            requested_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct CancelRecord<'a> {
    schema_version: &'static str,
    cancel: &'a str,
    requested_at: DateTime<Utc>,
}

/// Scheduling boundary the controller talks to
pub trait Notifier {
    fn schedule(&mut self, request: &NotificationRequest) -> Result<()>;
    fn cancel(&mut self, id: &str) -> Result<()>;
}

/// Notifier that writes JSONL requests to a destination
pub struct JsonlNotifier {
    writer: Box<dyn Write + Send>,
}

impl JsonlNotifier {
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
        }
    }

    pub fn file(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            writer: Box::new(file),
        })
    }

    fn emit<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let serialized = serde_json::to_vec(record)?;
        self.writer.write_all(&serialized)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush().map_err(Error::Io)?;
        Ok(())
    }
}

impl Notifier for JsonlNotifier {
    fn schedule(&mut self, request: &NotificationRequest) -> Result<()> {
        self.emit(request)
    }

    fn cancel(&mut self, id: &str) -> Result<()> {
        self.emit(&CancelRecord {
            schema_version: NOTIFY_SCHEMA_VERSION,
            cancel: id,
            requested_at: Utc::now(),
        })
    }
}

/// In-memory notifier for tests
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub scheduled: Vec<NotificationRequest>,
    pub cancelled: Vec<String>,
}

impl Notifier for MemoryNotifier {
    fn schedule(&mut self, request: &NotificationRequest) -> Result<()> {
        self.scheduled.push(request.clone());
        Ok(())
    }

    fn cancel(&mut self, id: &str) -> Result<()> {
        self.cancelled.push(id.to_string());
        Ok(())
    }
}
