//! tm edit command.

use chrono::Local;

use crate::cli::add::{
    parse_due_date, parse_due_time, parse_priority, push_schedule_summary, resolve_place,
};
use crate::cli::CliContext;
use crate::editor::{submit, SubmitMode, TaskForm};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{Category, Task};

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub place: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub search: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskUpdatedOutput {
    task: Task,
    status: String,
}

pub fn run(ctx: &CliContext, options: EditOptions) -> Result<()> {
    let store = ctx.store();
    let id = store.resolve_id(&options.id)?;
    let existing = store.get(&id)?;

    let place = resolve_place(
        ctx,
        options.place,
        options.lat,
        options.lon,
        options.search,
    )?;

    // Omitted fields stay as the form's "untouched" state, except the
    // title, which the form always holds, and the priority, which is
    // rewritten from this invocation even when not given.
    let form = TaskForm {
        title: options.title.unwrap_or_else(|| existing.title.clone()),
        description: options.description,
        due_date: parse_due_date(options.due_date.as_deref())?,
        due_time: parse_due_time(options.due_time.as_deref())?,
        place,
        priority: parse_priority(options.priority.as_deref())?,
        category: options.category.as_deref().map(Category::parse),
    };

    let task = submit(&store, form, SubmitMode::Edit { id })?;
    let now = Local::now().naive_local();
    let status = task.status_at(now).to_string();

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", status.clone());
    human.push_summary("Priority", task.priority.name());
    push_schedule_summary(&mut human, &task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &TaskUpdatedOutput { task, status },
        Some(&human),
    )
}
