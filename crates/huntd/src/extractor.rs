//! Git history extraction
//!
//! Runs one `git log` per repository on a bounded rayon pool. Each worker
//! returns an owned [`RepoScan`]; nothing is shared between workers and the
//! results are merged afterwards by [`CommitStore::build`](crate::store::CommitStore::build).
//!
//! Every git invocation is read-only: no index refresh, no optional locks.

use chrono::DateTime;
use huntd_core::process::run_with_timeout;
use huntd_core::{CancelToken, Config, DayBoundary, ProcessError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::filter::ScanFilter;
use crate::model::{repo_name, Commit, FileChange, RepoMeta};

const RECORD_SEP: char = '\u{1e}';
const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--pretty=format:%x1e%H%x1f%an%x1f%ae%x1f%cI";

/// Everything learned about one repository
#[derive(Debug, Clone)]
pub struct RepoScan {
    pub meta: RepoMeta,
    pub commits: Vec<Commit>,
}

/// Bounded-concurrency history reader
#[derive(Debug, Clone)]
pub struct HistoryExtractor {
    workers: usize,
    timeout: Duration,
    boundary: DayBoundary,
    git_program: String,
    filter: ScanFilter,
    cancel: CancelToken,
}

impl HistoryExtractor {
    pub fn new(config: &Config, filter: ScanFilter) -> Self {
        Self {
            workers: config.workers,
            timeout: Duration::from_secs(config.query_timeout_secs),
            boundary: config.day_boundary,
            git_program: config.git_program.clone(),
            filter,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Scan every repository, at most `workers` at a time.
    ///
    /// Failing repositories come back degraded; only cancellation or a pool
    /// that cannot start aborts the batch.
    pub fn extract(&self, repos: &[PathBuf]) -> Result<Vec<RepoScan>, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers.max(1))
            .thread_name(|i| format!("huntd-git-{}", i))
            .build()
            .map_err(|e| ScanError::WorkerPool(e.to_string()))?;

        info!(repos = repos.len(), workers = self.workers.max(1), "extracting history");
        let scans: Vec<RepoScan> =
            pool.install(|| repos.par_iter().map(|path| self.scan_repo(path)).collect());

        if self.cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        let degraded = scans.iter().filter(|s| s.meta.status.is_degraded()).count();
        if degraded > 0 {
            warn!(degraded, "some repositories could not be read");
        }
        Ok(scans)
    }

    /// Query a single repository. Never fails; problems degrade the result.
    ///
    /// The timeout is a budget for the whole repository, shared by every git
    /// call made against it.
    pub fn scan_repo(&self, path: &Path) -> RepoScan {
        let name = repo_name(path);
        debug!(repo = %name, "reading history");

        let deadline = Instant::now() + self.timeout;
        match self.read_repo(path, &name, deadline) {
            Ok(scan) => {
                debug!(repo = %name, commits = scan.commits.len(), "history read");
                scan
            }
            Err(err) => {
                warn!(repo = %name, "repository query failed: {}", err);
                RepoScan {
                    meta: RepoMeta::degraded(path, err.to_string()),
                    commits: Vec::new(),
                }
            }
        }
    }

    fn read_repo(
        &self,
        path: &Path,
        name: &str,
        deadline: Instant,
    ) -> Result<RepoScan, ProcessError> {
        let output = self.git(
            path,
            &["log", "--all", "--no-renames", "--numstat", LOG_FORMAT],
            deadline,
        )?;
        let commits: Vec<Commit> = parse_log(&output, name, self.boundary)
            .into_iter()
            .filter(|c| self.filter.matches(c))
            .collect();

        let mut meta = RepoMeta::new(path);
        meta.branch_count = self.branch_count(path, deadline)?;
        meta.has_readme = self.has_readme(path, deadline)?;
        meta.is_clean = self.is_clean(path, deadline)?;
        meta.observe(&commits);
        Ok(RepoScan { meta, commits })
    }

    fn branch_count(&self, path: &Path, deadline: Instant) -> Result<usize, ProcessError> {
        let refs = self.git(
            path,
            &["for-each-ref", "--format=%(refname)", "refs/heads", "refs/remotes"],
            deadline,
        );
        answered_or(refs, path, 0, count_branches)
    }

    /// `ls-tree HEAD` exits non-zero while the repository has no commits
    fn has_readme(&self, path: &Path, deadline: Instant) -> Result<bool, ProcessError> {
        let tree = self.git(path, &["ls-tree", "--name-only", "HEAD"], deadline);
        answered_or(tree, path, false, |out| {
            out.lines().any(|f| f.to_lowercase().contains("readme"))
        })
    }

    fn is_clean(&self, path: &Path, deadline: Instant) -> Result<bool, ProcessError> {
        let status = self.git(path, &["--no-optional-locks", "status", "--porcelain"], deadline);
        answered_or(status, path, false, |out| out.trim().is_empty())
    }

    fn git(&self, path: &Path, args: &[&str], deadline: Instant) -> Result<String, ProcessError> {
        let timed_out = ProcessError::TimedOut {
            secs: self.timeout.as_secs(),
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out);
        }

        let mut cmd = Command::new(&self.git_program);
        cmd.arg("-C")
            .arg(path)
            .args(["-c", "core.quotepath=off", "--no-pager"])
            .args(args)
            .env("GIT_OPTIONAL_LOCKS", "0")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C");
        // Stop git from wandering up into an enclosing repository
        if let Some(parent) = path.parent() {
            cmd.env("GIT_CEILING_DIRECTORIES", parent);
        }
        match run_with_timeout(&mut cmd, remaining, &self.cancel) {
            Err(ProcessError::TimedOut { .. }) => Err(timed_out),
            other => other,
        }
    }
}

/// Parse a metadata answer. git exiting non-zero means there is nothing to
/// report and yields `missing`; a query that never answered is an error.
fn answered_or<T>(
    result: Result<String, ProcessError>,
    path: &Path,
    missing: T,
    parse: impl FnOnce(&str) -> T,
) -> Result<T, ProcessError> {
    match result {
        Ok(out) => Ok(parse(&out)),
        Err(ProcessError::Failed { status, stderr }) => {
            debug!(repo = %path.display(), %status, "metadata query answered nothing: {}", stderr);
            Ok(missing)
        }
        Err(err) => Err(err),
    }
}

/// Parse `git log` output produced with [`LOG_FORMAT`] and `--numstat`.
///
/// Records with an unparseable header are dropped. Binary files (`-` counts)
/// carry no line information and are skipped.
pub(crate) fn parse_log(output: &str, repo: &str, boundary: DayBoundary) -> Vec<Commit> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| parse_record(record, repo, boundary))
        .collect()
}

fn parse_record(record: &str, repo: &str, boundary: DayBoundary) -> Option<Commit> {
    let mut lines = record.lines();
    let header = lines.next()?;
    let fields: Vec<&str> = header.split(FIELD_SEP).collect();
    if fields.len() != 4 || fields[0].is_empty() {
        return None;
    }
    let timestamp = DateTime::parse_from_rfc3339(fields[3].trim()).ok()?;

    let files = lines.filter_map(parse_numstat).collect();
    Some(Commit::new(
        repo, fields[0], fields[1], fields[2], timestamp, boundary, files,
    ))
}

fn parse_numstat(line: &str) -> Option<FileChange> {
    let mut parts = line.splitn(3, '\t');
    let added = parts.next()?.parse().ok()?;
    let removed = parts.next()?.parse().ok()?;
    let path = parts.next()?;
    if path.is_empty() {
        return None;
    }
    Some(FileChange::new(path, added, removed))
}

fn count_branches(refs: &str) -> usize {
    refs.lines()
        .map(str::trim)
        .filter(|r| !r.is_empty() && !r.ends_with("/HEAD"))
        .count()
}
