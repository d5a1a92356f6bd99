//! tm show command.

use chrono::Local;

use crate::cli::CliContext;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{format_due_date, format_due_time, Task};

pub struct ShowOptions {
    pub id: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskShowOutput {
    task: Task,
    status: String,
}

pub fn run(ctx: &CliContext, options: ShowOptions) -> Result<()> {
    let store = ctx.store();
    let id = store.resolve_id(&options.id)?;
    let task = store.get(&id)?;

    let now = Local::now().naive_local();
    let status = task.status_at(now).to_string();

    let mut human = HumanOutput::new(format!("Task {}", task.id));
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", status.clone());
    human.push_summary("Priority", task.priority.name());
    if let Some(category) = task.category.as_ref() {
        human.push_summary("Category", category.name());
    }
    if !task.description.is_empty() {
        human.push_summary("Description", task.description.clone());
    }
    if let Some(date) = task.due_date {
        human.push_summary("Due date", format_due_date(date));
    }
    if let Some(time) = task.due_time {
        human.push_summary("Due time", format_due_time(time));
    }
    if let Some(place) = task.place.as_ref() {
        human.push_summary(
            "Place",
            format!("{} ({}, {})", place.name, place.latitude, place.longitude),
        );
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &TaskShowOutput { task, status },
        Some(&human),
    )
}
