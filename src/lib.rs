//! taskmaster - Personal Task Management Library
//!
//! This library provides the core functionality for the tm CLI tool: tasks
//! with due dates, priorities, categories, and optional places, plus the
//! rules that present and alert on them.
//!
//! # Core Concepts
//!
//! - **Tasks**: Persisted records with a derived status (Complete,
//!   Overdue, Pending) that is recomputed on every read
//! - **Organizing**: Stable sorting plus category grouping into a
//!   presentation-ready view model
//! - **Proximity Alerts**: Tasks whose place falls within a radius of the
//!   user's location trigger nearby notifications
//! - **Notification Requests**: Reminders and alerts are emitted as JSONL
//!   requests for an external delivery agent
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `tm.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task entity, priority/category types, status derivation
//! - `store`: Task repository over the `tasks.json` snapshot
//! - `organizer`: Sorting, grouping, and search filtering
//! - `proximity`: Distance math and nearby-task matching
//! - `editor`: Form validation and persistence orchestration
//! - `board`: Task list orchestration and notification side effects
//! - `notify`: Notification request boundary
//! - `place`: Local place gazetteer
//! - `net`: Injectable network reachability boundary
//! - `storage`: Data directory layout and atomic JSON I/O
//! - `lock`: File locking for store mutations

pub mod board;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod lock;
pub mod net;
pub mod notify;
pub mod organizer;
pub mod output;
pub mod place;
pub mod proximity;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, Result};
