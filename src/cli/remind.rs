//! tm remind command.

use chrono::Local;

use crate::board::TaskBoard;
use crate::cli::CliContext;
use crate::error::Result;
use crate::organizer::SortCriteria;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct RemindOptions {
    pub search: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RemindOutput {
    scheduled: usize,
    total: usize,
}

pub fn run(ctx: &CliContext, options: RemindOptions) -> Result<()> {
    let mut board = TaskBoard::new(ctx.store(), SortCriteria::default());
    board.refresh()?;
    if let Some(query) = options.search.as_deref() {
        board.set_query(query);
    }

    let now = Local::now().naive_local();
    let total = board.working_set().len();
    let mut notifier = ctx.notifier()?;
    let scheduled = board.schedule_reminders(&mut notifier, now);

    let mut human = HumanOutput::new("Reminders scheduled");
    human.push_summary("Scheduled", scheduled.to_string());
    human.push_summary("Tasks considered", total.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "remind",
        &RemindOutput { scheduled, total },
        Some(&human),
    )
}
