//! tm nearby command.

use crate::board::TaskBoard;
use crate::cli::CliContext;
use crate::error::Result;
use crate::organizer::SortCriteria;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::proximity::Coordinates;

pub struct NearbyOptions {
    pub lat: f64,
    pub lon: f64,
    pub threshold: Option<f64>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct NearbyOutput {
    threshold_m: f64,
    alerted: Vec<String>,
}

pub fn run(ctx: &CliContext, options: NearbyOptions) -> Result<()> {
    let threshold_m = options
        .threshold
        .unwrap_or(ctx.config.proximity.threshold_m);

    let mut board = TaskBoard::new(ctx.store(), SortCriteria::default());
    board.refresh()?;

    let user = Coordinates::new(options.lat, options.lon);
    let mut notifier = ctx.notifier()?;
    let alerted = board.on_location_update(user, threshold_m, &mut notifier);

    let mut human = HumanOutput::new("Nearby tasks");
    human.push_summary("Radius", format!("{threshold_m} m"));
    human.push_summary("Alerts", alerted.len().to_string());
    for id in &alerted {
        human.push_detail(id.clone());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "nearby",
        &NearbyOutput {
            threshold_m,
            alerted,
        },
        Some(&human),
    )
}
