//! Error types for backlog
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown project/item, duplicate project, no selection, bad input)
//! - 4: Operation failed (corrupt data file, filesystem failure, export failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the backlog CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for backlog operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project already exists: {0}")]
    ProjectExists(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("No project selected")]
    NoProjectSelected,

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("Corrupt data file {path}: {message}")]
    CorruptData { path: PathBuf, message: String },

    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::ProjectNotFound(_)
            | Error::ProjectExists(_)
            | Error::ItemNotFound(_)
            | Error::NoProjectSelected
            | Error::Validation(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::CorruptData { .. }
            | Error::FileIo { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::Csv(_)
            | Error::Xlsx(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Attach the offending path to a bare IO error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for backlog operations
pub type Result<T> = std::result::Result<T, Error>;
