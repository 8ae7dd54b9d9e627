use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the chart core.
#[derive(Debug, Error)]
pub enum GanttError {
    /// Task validation: the end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Task validation: progress outside the 0-100 range.
    #[error("progress {0} is outside 0-100")]
    InvalidProgress(f32),

    /// The import source file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// A single row could not be turned into a task.
    #[error("row {row}: {message}")]
    Row { row: usize, message: String },

    /// The file content does not have the expected tabular shape.
    #[error("unrecognized format: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GanttError>;
