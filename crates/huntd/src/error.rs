//! Error types for scanning and analysis
//!
//! Only batch-level problems live here. A single repository failing to
//! answer is not an error: it becomes a degraded [`RepoStatus`](crate::model::RepoStatus).

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid filter values, reported before any extraction starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid {field} date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("since date {since} is after until date {until}")]
    InvertedRange { since: NaiveDate, until: NaiveDate },
}

/// Errors that abort a whole scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("scan target does not exist or is not a directory: {0}")]
    NoSuchPath(PathBuf),

    #[error(
        "commit count {count} exceeds the safety ceiling of {ceiling} \
         (raise max_commits or narrow the filter)"
    )]
    TooManyCommits { count: usize, ceiling: usize },

    #[error("scan cancelled")]
    Cancelled,

    #[error("could not start extraction workers: {0}")]
    WorkerPool(String),
}
