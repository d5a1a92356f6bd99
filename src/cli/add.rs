//! tm add command.

use chrono::{Local, NaiveDate, NaiveTime};

use crate::cli::CliContext;
use crate::editor::{submit, SubmitMode, TaskForm};
use crate::error::{Error, Result};
use crate::net::require_connectivity;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::place::{Place, PlaceIndex};
use crate::task::{format_due_date, format_due_time, Category, Priority, Task};

pub struct AddOptions {
    pub title: String,
    pub description: String,
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
struct TaskCreatedOutput {
    task: Task,
    status: String,
}

pub fn run(ctx: &CliContext, options: AddOptions) -> Result<()> {
    let store = ctx.store();
    let place = resolve_place(
        ctx,
        options.place,
        options.lat,
        options.lon,
        options.search,
    )?;

    let form = TaskForm {
        title: options.title,
        description: Some(options.description),
        due_date: parse_due_date(options.due_date.as_deref())?,
        due_time: parse_due_time(options.due_time.as_deref())?,
        place,
        priority: parse_priority(options.priority.as_deref())?,
        category: options.category.as_deref().map(Category::parse),
    };

    let task = submit(&store, form, SubmitMode::Create)?;
    let now = Local::now().naive_local();
    let status = task.status_at(now).to_string();

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", status.clone());
    push_schedule_summary(&mut human, &task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &TaskCreatedOutput { task, status },
        Some(&human),
    )
}

pub(crate) fn push_schedule_summary(human: &mut HumanOutput, task: &Task) {
    if let Some(date) = task.due_date {
        human.push_summary("Due date", format_due_date(date));
    }
    if let Some(time) = task.due_time {
        human.push_summary("Due time", format_due_time(time));
    }
    if let Some(place) = task.place.as_ref() {
        human.push_summary("Place", place.name.clone());
    }
}

pub(crate) fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            Error::InvalidArgument(format!("invalid due date '{raw}' (expected YYYY-MM-DD)"))
        })
}

pub(crate) fn parse_due_time(raw: Option<&str>) -> Result<Option<NaiveTime>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map(Some)
        .map_err(|_| {
            Error::InvalidArgument(format!("invalid due time '{raw}' (expected HH:MM)"))
        })
}

pub(crate) fn parse_priority(raw: Option<&str>) -> Result<Priority> {
    match raw {
        Some(value) => Priority::parse(value),
        None => Ok(Priority::None),
    }
}

/// Resolve the place arguments into an attachable `Place`.
///
/// `--place` with explicit coordinates works offline; `--search` consults
/// the gazetteer and is gated on connectivity like the original map
/// search.
pub(crate) fn resolve_place(
    ctx: &CliContext,
    place: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    search: Option<String>,
) -> Result<Option<Place>> {
    if let Some(query) = search {
        require_connectivity(&ctx.reachability, "place search")?;
        let index = PlaceIndex::new(ctx.storage.clone());
        let mut results = index.search(&query)?;
        if results.is_empty() {
            return Err(Error::PlaceNotFound(query));
        }
        return Ok(Some(results.remove(0)));
    }

    match (place, lat, lon) {
        (Some(name), Some(latitude), Some(longitude)) => Ok(Some(Place {
            name,
            latitude,
            longitude,
        })),
        (None, _, _) => Ok(None),
        // clap enforces the pairing; this covers direct library callers.
        _ => Err(Error::InvalidArgument(
            "--place needs both --lat and --lon".to_string(),
        )),
    }
}
