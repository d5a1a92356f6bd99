//! tm delete command.

use crate::board::TaskBoard;
use crate::cli::CliContext;
use crate::error::Result;
use crate::organizer::SortCriteria;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct DeleteOptions {
    pub id: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskDeletedOutput {
    id: String,
    deleted: bool,
}

pub fn run(ctx: &CliContext, options: DeleteOptions) -> Result<()> {
    let store = ctx.store();
    let id = store.resolve_id(&options.id)?;

    let mut board = TaskBoard::new(store, SortCriteria::default());
    board.refresh()?;
    let mut notifier = ctx.notifier()?;
    board.delete(&id, &mut notifier)?;

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", id.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &TaskDeletedOutput { id, deleted: true },
        Some(&human),
    )
}
