//! Normalized records produced by extraction
//!
//! Commits and repository metadata are immutable once built. The store owns
//! them; analytics only ever borrows.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use huntd_core::DayBoundary;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::language::language_for;

/// Index of a repository inside one [`CommitStore`](crate::store::CommitStore)
pub type RepoId = usize;

/// Lines changed in one file by one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Path relative to the repository root
    pub path: String,
    /// Language inferred from the extension
    pub language: String,
    pub added: u64,
    pub removed: u64,
}

impl FileChange {
    pub fn new(path: impl Into<String>, added: u64, removed: u64) -> Self {
        let path = path.into();
        let language = language_for(&path);
        Self {
            path,
            language,
            added,
            removed,
        }
    }

    /// Lines added plus lines removed
    pub fn churn(&self) -> u64 {
        self.added + self.removed
    }
}

/// One observed commit, scoped to one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Name of the owning repository (directory basename)
    pub repo: String,
    pub hash: String,
    pub author: String,
    /// Trimmed, lowercased author email
    pub email: String,
    /// Committer timestamp with the committer's own offset
    pub timestamp: DateTime<FixedOffset>,
    /// Wall-clock time under the scan's day boundary
    pub local_time: NaiveDateTime,
    pub files: Vec<FileChange>,
}

impl Commit {
    pub fn new(
        repo: impl Into<String>,
        hash: impl Into<String>,
        author: impl Into<String>,
        email: &str,
        timestamp: DateTime<FixedOffset>,
        boundary: DayBoundary,
        files: Vec<FileChange>,
    ) -> Self {
        Self {
            repo: repo.into(),
            hash: hash.into(),
            author: author.into(),
            email: normalize_email(email),
            local_time: boundary.civil(&timestamp),
            timestamp,
            files,
        }
    }

    /// Calendar day this commit counts towards
    pub fn day(&self) -> NaiveDate {
        self.local_time.date()
    }

    pub fn lines_added(&self) -> u64 {
        self.files.iter().map(|f| f.added).sum()
    }

    pub fn lines_removed(&self) -> u64 {
        self.files.iter().map(|f| f.removed).sum()
    }

    /// Lines added plus lines removed across all files
    pub fn churn(&self) -> u64 {
        self.files.iter().map(FileChange::churn).sum()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Outcome of querying one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RepoStatus {
    Ok,
    /// History could not be read; the repository contributes no commits
    Degraded { reason: String },
}

impl RepoStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Per-repository metadata, derived once per scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoMeta {
    pub path: PathBuf,
    pub name: String,
    pub branch_count: usize,
    pub has_readme: bool,
    /// No uncommitted changes at scan time
    pub is_clean: bool,
    /// Commits observed under the active filter
    pub commit_count: usize,
    pub first_commit: Option<DateTime<FixedOffset>>,
    pub last_commit: Option<DateTime<FixedOffset>>,
    pub status: RepoStatus,
}

impl RepoMeta {
    /// Metadata with nothing known yet
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: repo_name(path),
            branch_count: 0,
            has_readme: false,
            is_clean: false,
            commit_count: 0,
            first_commit: None,
            last_commit: None,
            status: RepoStatus::Ok,
        }
    }

    pub fn degraded(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            status: RepoStatus::Degraded {
                reason: reason.into(),
            },
            ..Self::new(path)
        }
    }

    /// Refresh commit count and first/last timestamps from an observed commit set
    pub fn observe(&mut self, commits: &[Commit]) {
        self.commit_count = commits.len();
        self.first_commit = commits.iter().map(|c| c.timestamp).min();
        self.last_commit = commits.iter().map(|c| c.timestamp).max();
    }
}

/// Directory basename, falling back to the full path for roots like `/`
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
