//! tm done command.

use chrono::Local;

use crate::board::TaskBoard;
use crate::cli::CliContext;
use crate::error::Result;
use crate::organizer::SortCriteria;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

pub struct DoneOptions {
    pub id: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskDoneOutput {
    task: Task,
    status: String,
}

pub fn run(ctx: &CliContext, options: DoneOptions) -> Result<()> {
    let store = ctx.store();
    let id = store.resolve_id(&options.id)?;

    let mut board = TaskBoard::new(store, SortCriteria::default());
    board.refresh()?;
    let mut notifier = ctx.notifier()?;
    let task = board.toggle_complete(&id, &mut notifier)?;

    let now = Local::now().naive_local();
    let status = task.status_at(now).to_string();
    let header = if task.is_complete {
        "Task completed"
    } else {
        "Task reopened"
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", status.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &TaskDoneOutput { task, status },
        Some(&human),
    )
}
