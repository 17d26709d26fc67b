//! huntd - Developer activity analytics from local git repositories
//!
//! Finds every repository under a directory, reads its history with `git log`
//! on a bounded worker pool, and derives streaks, heatmaps, language breakdowns,
//! health scores, velocity trends and achievements from the merged timeline.
//!
//! Data flows one way:
//! - [`locator`]: discover repository roots
//! - [`extractor`]: query each repository's history in parallel
//! - [`store`]: merge, deduplicate, order and index commits
//! - [`analytics`]: pure derivations over the store
//! - [`achievements`]: badge conditions over the derived result
//! - [`pipeline`]: single scans and side-by-side comparisons
//!
//! Repositories are only ever read; no git command issued here writes.

pub mod achievements;
pub mod analytics;
pub mod display;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod language;
pub mod locator;
pub mod model;
pub mod pipeline;
pub mod store;

pub use achievements::{evaluate_achievements, Achievement};
pub use analytics::{analyze, AnalysisContext, AnalyticsResult};
pub use error::{FilterError, ScanError};
pub use extractor::{HistoryExtractor, RepoScan};
pub use filter::ScanFilter;
pub use locator::RepositoryLocator;
pub use model::{Commit, FileChange, RepoMeta, RepoStatus};
pub use pipeline::{Comparison, ScanReport, Scanner};
pub use store::CommitStore;
