//! Command-line interface for tm
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::net::ConfiguredReachability;
use crate::notify::{JsonlNotifier, NotifyDestination};
use crate::storage::Storage;
use crate::store::TaskStore;

mod add;
mod delete;
mod done;
mod edit;
mod list;
mod nearby;
mod place;
mod remind;
mod show;

/// tm - personal task manager
///
/// Tasks with due dates, priorities, categories, and optional places;
/// reminders and proximity alerts are emitted as notification requests for
/// an external delivery agent.
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Notification destination: "-" for stdout, or a file path
    #[arg(long, global = true, env = "TM_NOTIFICATIONS")]
    pub notifications: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,

        /// Due time (HH:MM or HH:MM:SS)
        #[arg(long)]
        due_time: Option<String>,

        /// Priority: high, medium, low, none, or 0-3
        #[arg(short, long)]
        priority: Option<String>,

        /// Category label (Work, Personal, Urgent, Study, Other, or free text)
        #[arg(short, long)]
        category: Option<String>,

        /// Place name to attach (requires --lat and --lon)
        #[arg(long, requires = "lat", requires = "lon")]
        place: Option<String>,

        /// Place latitude
        #[arg(long)]
        lat: Option<f64>,

        /// Place longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Resolve a place by searching the gazetteer (needs connectivity)
        #[arg(long, conflicts_with = "place")]
        search: Option<String>,
    },

    /// Edit a task (omitted fields stay unchanged; priority is always
    /// rewritten from this invocation)
    Edit {
        /// Task id (full id, suffix, or unambiguous prefix)
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,

        /// Due time (HH:MM or HH:MM:SS)
        #[arg(long)]
        due_time: Option<String>,

        /// Priority: high, medium, low, none, or 0-3
        #[arg(short, long)]
        priority: Option<String>,

        /// Category label
        #[arg(short, long)]
        category: Option<String>,

        /// Place name to attach (requires --lat and --lon)
        #[arg(long, requires = "lat", requires = "lon")]
        place: Option<String>,

        /// Place latitude
        #[arg(long)]
        lat: Option<f64>,

        /// Place longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Resolve a place by searching the gazetteer (needs connectivity)
        #[arg(long, conflicts_with = "place")]
        search: Option<String>,
    },

    /// List tasks, grouped by category
    List {
        /// Sort criteria: due, priority, or category
        #[arg(short, long)]
        sort: Option<String>,

        /// Filter tasks by a search query
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one task in full
    Show {
        /// Task id
        id: String,
    },

    /// Toggle a task's completion state
    Done {
        /// Task id
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },

    /// Emit due reminders for the current tasks
    Remind {
        /// Filter tasks by a search query first
        #[arg(long)]
        search: Option<String>,
    },

    /// Check which tasks are near a location and emit alerts
    Nearby {
        /// Current latitude
        #[arg(long)]
        lat: f64,

        /// Current longitude
        #[arg(long)]
        lon: f64,

        /// Alert radius in meters (defaults to configuration)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Maintain and query the place gazetteer
    #[command(subcommand)]
    Place(PlaceCommands),
}

/// Place subcommands
#[derive(Subcommand, Debug)]
pub enum PlaceCommands {
    /// Add or replace a named place
    Add {
        /// Place name
        name: String,

        /// Latitude
        #[arg(long)]
        lat: f64,

        /// Longitude
        #[arg(long)]
        lon: f64,
    },

    /// List stored places
    List,

    /// Search places by name (needs connectivity)
    Search {
        /// Query text
        query: String,
    },

    /// Find the place nearest to a coordinate (needs connectivity)
    Near {
        /// Latitude
        #[arg(long)]
        lat: f64,

        /// Longitude
        #[arg(long)]
        lon: f64,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let ctx = CliContext::load(self.data_dir, self.notifications)?;
        let json = self.json && !ctx.notify_to_stdout;
        let quiet = self.quiet || ctx.notify_to_stdout;

        match self.command {
            Commands::Add {
                title,
                description,
                due_date,
                due_time,
                priority,
                category,
                place,
                lat,
                lon,
                search,
            } => add::run(
                &ctx,
                add::AddOptions {
                    title,
                    description,
                    due_date,
                    due_time,
                    priority,
                    category,
                    place,
                    lat,
                    lon,
                    search,
                    json,
                    quiet,
                },
            ),
            Commands::Edit {
                id,
                title,
                description,
                due_date,
                due_time,
                priority,
                category,
                place,
                lat,
                lon,
                search,
            } => edit::run(
                &ctx,
                edit::EditOptions {
                    id,
                    title,
                    description,
                    due_date,
                    due_time,
                    priority,
                    category,
                    place,
                    lat,
                    lon,
                    search,
                    json,
                    quiet,
                },
            ),
            Commands::List { sort, search } => list::run(
                &ctx,
                list::ListOptions {
                    sort,
                    search,
                    json,
                    quiet,
                },
            ),
            Commands::Show { id } => show::run(&ctx, show::ShowOptions { id, json, quiet }),
            Commands::Done { id } => done::run(&ctx, done::DoneOptions { id, json, quiet }),
            Commands::Delete { id } => {
                delete::run(&ctx, delete::DeleteOptions { id, json, quiet })
            }
            Commands::Remind { search } => {
                remind::run(&ctx, remind::RemindOptions { search, json, quiet })
            }
            Commands::Nearby {
                lat,
                lon,
                threshold,
            } => nearby::run(
                &ctx,
                nearby::NearbyOptions {
                    lat,
                    lon,
                    threshold,
                    json,
                    quiet,
                },
            ),
            Commands::Place(command) => place::run(&ctx, command, json, quiet),
        }
    }
}

/// Shared state every command starts from
pub(crate) struct CliContext {
    pub storage: Storage,
    pub config: Config,
    pub reachability: ConfiguredReachability,
    notify_destination: NotifyDestination,
    notify_to_stdout: bool,
}

impl CliContext {
    fn load(data_dir: Option<PathBuf>, notifications: Option<String>) -> Result<Self> {
        let storage = Storage::resolve(data_dir)?;
        let config = Config::load(&storage.config_file())?;
        let reachability = ConfiguredReachability::from_config(&config.network);

        let raw = notifications.unwrap_or_else(|| config.notifications.destination.clone());
        let notify_destination = match NotifyDestination::parse(&raw) {
            Some(NotifyDestination::File(path)) if path.is_relative() => {
                NotifyDestination::File(storage.data_dir().join(path))
            }
            Some(destination) => destination,
            None => NotifyDestination::File(storage.data_dir().join("notifications.jsonl")),
        };
        let notify_to_stdout = matches!(notify_destination, NotifyDestination::Stdout);

        Ok(Self {
            storage,
            config,
            reachability,
            notify_destination,
            notify_to_stdout,
        })
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::new(self.storage.clone(), self.config.ids.clone())
    }

    pub fn notifier(&self) -> Result<JsonlNotifier> {
        self.storage.init()?;
        self.notify_destination.open()
    }
}
