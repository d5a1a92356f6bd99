//! Error types for taskmaster
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, validation failure, unknown task)
//! - 3: Blocked by connectivity (network-dependent feature while offline)
//! - 4: Operation failed (store I/O, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tm CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OFFLINE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskmaster operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Title cannot be empty")]
    TitleRequired,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("No place matches: {0}")]
    PlaceNotFound(String),

    // Connectivity blocks (exit code 3)
    #[error("No network connection: {0} needs connectivity")]
    Offline(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::TitleRequired
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::TaskNotFound(_)
            | Error::PlaceNotFound(_) => exit_codes::USER_ERROR,

            // Connectivity blocks
            Error::Offline(_) => exit_codes::OFFLINE_BLOCKED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Result type alias for taskmaster operations
pub type Result<T> = std::result::Result<T, Error>;
