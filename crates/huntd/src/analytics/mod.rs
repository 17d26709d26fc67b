//! Analytics engine
//!
//! Each derivation is a pure function of a [`CommitStore`] (plus, for the
//! date-dependent ones, the [`AnalysisContext`]). None reads another's
//! output; [`analyze`] just calls them all and bundles the results.
//! Every derivation returns a well-defined empty result for an empty store.

pub mod activity;
pub mod evolution;
pub mod focus;
pub mod health;
pub mod heatmap;
pub mod hotspots;
pub mod languages;
pub mod streaks;
pub mod velocity;
pub mod workday;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use huntd_core::{Config, DayBoundary};
use serde::Serialize;

use crate::filter::ScanFilter;
use crate::store::CommitStore;

pub use activity::ActivityPattern;
pub use evolution::LanguageEvolution;
pub use focus::FocusScore;
pub use health::{HealthScore, RepoSummary};
pub use heatmap::Heatmap;
pub use hotspots::Hotspot;
pub use languages::LanguageShare;
pub use streaks::Streaks;
pub use velocity::{Trend, Velocity};
pub use workday::WorkdaySplit;

/// Inputs besides the store that some derivations need
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Instant the analysis treats as "now"
    pub now: DateTime<Utc>,
    pub boundary: DayBoundary,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub velocity_window_weeks: usize,
    pub velocity_flat_threshold: f64,
    pub hotspot_limit: usize,
}

impl AnalysisContext {
    pub fn new(config: &Config, filter: &ScanFilter, now: DateTime<Utc>) -> Self {
        Self {
            now,
            boundary: config.day_boundary,
            since: filter.since,
            until: filter.until,
            velocity_window_weeks: config.velocity_window_weeks,
            velocity_flat_threshold: config.velocity_flat_threshold,
            hotspot_limit: config.hotspot_limit,
        }
    }

    /// Current calendar day under the configured boundary
    pub fn today(&self) -> NaiveDate {
        self.boundary.today(self.now)
    }
}

/// Aggregate counts across all repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub repos: usize,
    /// Repositories with at least one commit under the filter
    pub active_repos: usize,
    pub degraded_repos: usize,
    pub commits: usize,
    pub languages: usize,
    pub lines_added: u64,
    pub lines_removed: u64,
}

/// Every derived view of one scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    pub totals: Totals,
    pub streaks: Streaks,
    pub heatmap: Heatmap,
    pub languages: Vec<LanguageShare>,
    pub repos: Vec<RepoSummary>,
    pub velocity: Velocity,
    pub language_evolution: LanguageEvolution,
    pub focus: FocusScore,
    pub workday_split: WorkdaySplit,
    pub hotspots: Vec<Hotspot>,
    pub activity: ActivityPattern,
}

/// Run every derivation over `store`
pub fn analyze(store: &CommitStore, ctx: &AnalysisContext) -> AnalyticsResult {
    let today = ctx.today();
    // Without an explicit end the current week is still in progress
    let trend_through = ctx.until.unwrap_or(today - Duration::days(7));
    let languages = languages::language_breakdown(store);

    let totals = Totals {
        repos: store.repos().len(),
        active_repos: (0..store.repos().len())
            .filter(|&id| store.repo_commit_count(id) > 0)
            .count(),
        degraded_repos: store
            .repos()
            .iter()
            .filter(|r| r.status.is_degraded())
            .count(),
        commits: store.len(),
        languages: languages.len(),
        lines_added: store.commits().iter().map(|c| c.lines_added()).sum(),
        lines_removed: store.commits().iter().map(|c| c.lines_removed()).sum(),
    };

    AnalyticsResult {
        totals,
        streaks: streaks::compute_streaks(store, today),
        heatmap: heatmap::compute_heatmap(store, ctx.since, ctx.until),
        languages,
        repos: health::repo_summaries(store, ctx.now),
        velocity: velocity::compute_velocity(
            store,
            ctx.until.unwrap_or(today),
            trend_through,
            ctx.velocity_window_weeks,
            ctx.velocity_flat_threshold,
        ),
        language_evolution: evolution::language_evolution(store),
        focus: focus::focus_score(store),
        workday_split: workday::workday_split(store),
        hotspots: hotspots::file_hotspots(store, ctx.hotspot_limit),
        activity: activity::activity_patterns(store, today),
    }
}

/// Percentage of `part` in `total`, 0 when the total is 0
pub(crate) fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
