//! Repository health scores and per-repository summaries
//!
//! Health is a 0-100 sum of five independent components:
//! - recency (40): last commit within 7/30/90/365 days → 40/30/20/10
//! - volume (20): 100+/50+/10+/1+ commits → 20/15/10/5
//! - readme (15)
//! - branches (15): 1-5 → 15, 6-10 → 10, 11+ → 5, none → 0
//! - clean working tree (10)

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::{RepoMeta, RepoStatus};
use crate::store::CommitStore;

/// Health score with its breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub total: u8,
    pub recency: u8,
    pub volume: u8,
    pub readme: u8,
    pub branches: u8,
    pub clean: u8,
}

impl HealthScore {
    /// Score one repository given how many commits it has and the current instant
    pub fn compute(meta: &RepoMeta, commits: usize, now: DateTime<Utc>) -> Self {
        let recency = match meta.last_commit {
            Some(last) if commits > 0 => {
                recency_points((now - last.with_timezone(&Utc)).num_days())
            }
            _ => 0,
        };
        let volume = match commits {
            0 => 0,
            1..=9 => 5,
            10..=49 => 10,
            50..=99 => 15,
            _ => 20,
        };
        let readme = if meta.has_readme { 15 } else { 0 };
        let branches = match meta.branch_count {
            0 => 0,
            1..=5 => 15,
            6..=10 => 10,
            _ => 5,
        };
        let clean = if meta.is_clean { 10 } else { 0 };

        let total = (recency + volume + readme + branches + clean).min(100);
        Self {
            total,
            recency,
            volume,
            readme,
            branches,
            clean,
        }
    }
}

fn recency_points(days_ago: i64) -> u8 {
    match days_ago.max(0) {
        0..=7 => 40,
        8..=30 => 30,
        31..=90 => 20,
        91..=365 => 10,
        _ => 0,
    }
}

/// One repository as presented to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub path: PathBuf,
    pub status: RepoStatus,
    pub commits: usize,
    pub lines_added: u64,
    pub lines_removed: u64,
    /// Language with the most lines changed, if any files were touched
    pub primary_language: Option<String>,
    pub branch_count: usize,
    pub has_readme: bool,
    pub is_clean: bool,
    pub first_commit: Option<DateTime<FixedOffset>>,
    pub last_commit: Option<DateTime<FixedOffset>>,
    pub health: HealthScore,
}

/// Summaries for every repository, most commits first (name breaks ties)
pub fn repo_summaries(store: &CommitStore, now: DateTime<Utc>) -> Vec<RepoSummary> {
    let mut summaries: Vec<RepoSummary> = store
        .repos()
        .iter()
        .enumerate()
        .map(|(id, meta)| {
            let mut lines_added = 0;
            let mut lines_removed = 0;
            let mut by_language: BTreeMap<&str, u64> = BTreeMap::new();
            for commit in store.repo_commits(id) {
                for file in &commit.files {
                    lines_added += file.added;
                    lines_removed += file.removed;
                    *by_language.entry(file.language.as_str()).or_default() += file.churn();
                }
            }
            // max_by_key keeps the last maximum; walk names backwards so the smallest wins
            let primary_language = by_language
                .iter()
                .rev()
                .max_by_key(|(_, lines)| **lines)
                .map(|(lang, _)| lang.to_string());

            let commits = store.repo_commit_count(id);
            RepoSummary {
                name: meta.name.clone(),
                path: meta.path.clone(),
                status: meta.status.clone(),
                commits,
                lines_added,
                lines_removed,
                primary_language,
                branch_count: meta.branch_count,
                has_readme: meta.has_readme,
                is_clean: meta.is_clean,
                first_commit: meta.first_commit,
                last_commit: meta.last_commit,
                health: HealthScore::compute(meta, commits, now),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.path.cmp(&b.path))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileChange;
    use crate::store::tests::{commit, scan, store};
    use chrono::Duration;
    use std::path::Path;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn meta(days_ago: Option<i64>, branches: usize, readme: bool, clean: bool) -> RepoMeta {
        let mut meta = RepoMeta::new(Path::new("/work/r"));
        meta.branch_count = branches;
        meta.has_readme = readme;
        meta.is_clean = clean;
        meta.last_commit = days_ago.map(|d| (now() - Duration::days(d)).into());
        meta
    }

    #[test]
    fn test_perfect_repo() {
        let score = HealthScore::compute(&meta(Some(1), 3, true, true), 150, now());
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_old_small_clean_repo() {
        // 0 branches, no README, 400 days old, 5 commits, clean tree
        let score = HealthScore::compute(&meta(Some(400), 0, false, true), 5, now());
        assert_eq!(score.recency, 0);
        assert_eq!(score.volume, 5);
        assert_eq!(score.readme, 0);
        assert_eq!(score.branches, 0);
        assert_eq!(score.clean, 10);
        assert_eq!(score.total, 15);
    }

    #[test]
    fn test_zero_commits_keeps_hygiene_points() {
        let score = HealthScore::compute(&meta(None, 2, true, true), 0, now());
        assert_eq!(score.recency, 0);
        assert_eq!(score.volume, 0);
        assert_eq!(score.total, 40);
    }

    #[test]
    fn test_recency_boundaries() {
        assert_eq!(recency_points(7), 40);
        assert_eq!(recency_points(8), 30);
        assert_eq!(recency_points(30), 30);
        assert_eq!(recency_points(90), 20);
        assert_eq!(recency_points(365), 10);
        assert_eq!(recency_points(366), 0);
        // Clock skew: a commit "from the future" counts as fresh
        assert_eq!(recency_points(-2), 40);
    }

    #[test]
    fn test_branch_and_volume_bands() {
        let m = |b| meta(None, b, false, false);
        assert_eq!(HealthScore::compute(&m(6), 0, now()).branches, 10);
        assert_eq!(HealthScore::compute(&m(11), 0, now()).branches, 5);
        assert_eq!(HealthScore::compute(&m(0), 10, now()).volume, 10);
        assert_eq!(HealthScore::compute(&m(0), 50, now()).volume, 15);
        assert_eq!(HealthScore::compute(&m(0), 100, now()).volume, 20);
    }

    #[test]
    fn test_score_always_in_range() {
        for commits in [0, 1, 10, 50, 100, 10_000] {
            for branches in [0, 1, 6, 11, 500] {
                for days in [None, Some(0), Some(40), Some(5000)] {
                    for flags in [(false, false), (true, true)] {
                        let m = meta(days, branches, flags.0, flags.1);
                        let s = HealthScore::compute(&m, commits, now());
                        assert!(s.total <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_summaries_sorted_and_primary_language() {
        let s = store(vec![
            scan(
                "small",
                vec![commit(
                    "small",
                    "1",
                    "2025-05-30T10:00:00Z",
                    vec![FileChange::new("x.py", 5, 0)],
                )],
            ),
            scan(
                "big",
                vec![
                    commit(
                        "big",
                        "2",
                        "2025-05-30T10:00:00Z",
                        vec![FileChange::new("a.rs", 10, 2), FileChange::new("b.go", 12, 0)],
                    ),
                    commit("big", "3", "2025-05-31T10:00:00Z", vec![FileChange::new("c.rs", 0, 0)]),
                ],
            ),
        ]);
        let summaries = repo_summaries(&s, now());
        assert_eq!(summaries[0].name, "big");
        assert_eq!(summaries[0].commits, 2);
        assert_eq!(summaries[0].lines_added, 22);
        assert_eq!(summaries[0].lines_removed, 2);
        // Rust and Go tie on 12 lines: name order wins
        assert_eq!(summaries[0].primary_language.as_deref(), Some("Go"));
        assert_eq!(summaries[0].health.recency, 40);
        assert_eq!(summaries[1].name, "small");
    }

    #[test]
    fn test_degraded_repo_listed() {
        let s = CommitStore::build(
            vec![crate::extractor::RepoScan {
                meta: RepoMeta::degraded(Path::new("/work/broken"), "timed out"),
                commits: vec![],
            }],
            10,
        )
        .unwrap();
        let summaries = repo_summaries(&s, now());
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].status.is_degraded());
        assert_eq!(summaries[0].health.total, 0);
        assert_eq!(summaries[0].primary_language, None);
    }
}
