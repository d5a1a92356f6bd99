//! tm list command.

use chrono::Local;

use crate::board::TaskBoard;
use crate::cli::CliContext;
use crate::error::Result;
use crate::organizer::{GroupedTasks, SortCriteria};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{format_due_date, Task};

pub struct ListOptions {
    pub sort: Option<String>,
    pub search: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    sort: &'static str,
    grouped: GroupedTasks,
}

pub fn run(ctx: &CliContext, options: ListOptions) -> Result<()> {
    let sort = match options.sort.as_deref() {
        Some(raw) => SortCriteria::parse(raw)?,
        None => SortCriteria::parse(&ctx.config.list.default_sort)?,
    };

    let mut board = TaskBoard::new(ctx.store(), sort);
    board.refresh()?;
    if let Some(query) = options.search.as_deref() {
        board.set_query(query);
    }

    let now = Local::now().naive_local();
    let grouped = board.grouped(now);

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", grouped.task_count().to_string());
    human.push_summary("Sort", sort.name());
    if grouped.is_empty() {
        human.push_detail("No tasks added yet".to_string());
    }
    for section in &grouped.sections {
        let header = if section.category.is_empty() {
            "(uncategorized)"
        } else {
            section.category.as_str()
        };
        human.push_detail(format!("{header}:"));
        for task in &section.tasks {
            human.push_detail(format!("  {}", task_line(task, now)));
        }
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &TaskListOutput {
            total: grouped.task_count(),
            sort: sort.name(),
            grouped,
        },
        Some(&human),
    )
}

fn task_line(task: &Task, now: chrono::NaiveDateTime) -> String {
    let mut line = format!(
        "[{}][{}] {} {}",
        task.status_at(now),
        task.priority.name(),
        task.id,
        task.title
    );
    if let Some(date) = task.due_date {
        line.push_str(&format!(" (due {})", format_due_date(date)));
    }
    if let Some(place) = task.place.as_ref() {
        line.push_str(&format!(" @ {}", place.name));
    }
    line
}
