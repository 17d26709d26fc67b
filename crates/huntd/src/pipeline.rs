//! Scan pipeline
//!
//! Wires locator, extractor, store, analytics and achievements together for
//! one target, and runs two fully independent scans for a comparison.

use chrono::{DateTime, Utc};
use huntd_core::{CancelToken, Config};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::achievements::{evaluate_achievements, Achievement};
use crate::analytics::{analyze, AnalysisContext, AnalyticsResult};
use crate::error::ScanError;
use crate::extractor::HistoryExtractor;
use crate::filter::ScanFilter;
use crate::locator::RepositoryLocator;
use crate::store::CommitStore;

/// Complete output of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Label of the scanned target, usually its path
    pub target: String,
    pub filter: ScanFilter,
    pub generated_at: DateTime<Utc>,
    pub analytics: AnalyticsResult,
    pub achievements: Vec<Achievement>,
}

/// Two independent scans, side by side
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left: ScanReport,
    pub right: ScanReport,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    config: Config,
    filter: ScanFilter,
    cancel: CancelToken,
}

impl Scanner {
    pub fn new(config: Config, filter: ScanFilter) -> Self {
        Self {
            config,
            filter,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Token that aborts any scan this scanner is running
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Locate, extract and merge every repository under `targets`
    pub fn build_store(&self, targets: &[PathBuf]) -> Result<CommitStore, ScanError> {
        let repos = RepositoryLocator::from_config(&self.config).locate_all(targets)?;
        info!(repos = repos.len(), "repositories located");

        let scans = HistoryExtractor::new(&self.config, self.filter.clone())
            .with_cancel(self.cancel.clone())
            .extract(&repos)?;
        let store = CommitStore::build(scans, self.config.max_commits)?;
        info!(commits = store.len(), "history merged");
        Ok(store)
    }

    /// Derive the full report from an already-built store
    pub fn report(
        &self,
        target: impl Into<String>,
        store: &CommitStore,
        now: DateTime<Utc>,
    ) -> ScanReport {
        let ctx = AnalysisContext::new(&self.config, &self.filter, now);
        let analytics = analyze(store, &ctx);
        let achievements = evaluate_achievements(&analytics);
        ScanReport {
            target: target.into(),
            filter: self.filter.clone(),
            generated_at: now,
            analytics,
            achievements,
        }
    }

    /// Scan one directory tree end to end
    pub fn scan(&self, target: &Path, now: DateTime<Utc>) -> Result<ScanReport, ScanError> {
        let store = self.build_store(&[target.to_path_buf()])?;
        Ok(self.report(target.display().to_string(), &store, now))
    }

    /// Scan two targets with nothing shared between them
    pub fn compare(
        &self,
        left: &Path,
        right: &Path,
        now: DateTime<Utc>,
    ) -> Result<Comparison, ScanError> {
        Ok(Comparison {
            left: self.scan(left, now)?,
            right: self.scan(right, now)?,
        })
    }
}
