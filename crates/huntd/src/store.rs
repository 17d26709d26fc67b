//! In-memory commit store
//!
//! Built once per scan from the extractor's results and read-only afterwards.
//! Commits are deduplicated per repository, put in canonical order
//! (timestamp, then repository name, then hash) and indexed by repository,
//! calendar day and author.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use crate::error::ScanError;
use crate::extractor::RepoScan;
use crate::filter::ScanFilter;
use crate::model::{Commit, RepoId, RepoMeta};

/// Immutable view over every commit and repository of one scan
#[derive(Debug, Clone, Default)]
pub struct CommitStore {
    repos: Vec<RepoMeta>,
    commits: Vec<Commit>,
    /// Owning repository of `commits[i]`
    owners: Vec<RepoId>,
    by_repo: Vec<Vec<usize>>,
    by_day: BTreeMap<NaiveDate, Vec<usize>>,
    by_author: BTreeMap<String, Vec<usize>>,
}

impl CommitStore {
    /// Merge extraction results.
    ///
    /// Fails when more than `ceiling` distinct commits would be held.
    pub fn build(mut scans: Vec<RepoScan>, ceiling: usize) -> Result<Self, ScanError> {
        scans.sort_by(|a, b| a.meta.path.cmp(&b.meta.path));

        let mut repos = Vec::with_capacity(scans.len());
        let mut entries: Vec<(RepoId, Commit)> = Vec::new();
        let mut seen: HashSet<(RepoId, String)> = HashSet::new();

        for (id, scan) in scans.into_iter().enumerate() {
            repos.push(scan.meta);
            for commit in scan.commits {
                if !seen.insert((id, commit.hash.clone())) {
                    continue;
                }
                if entries.len() >= ceiling {
                    return Err(ScanError::TooManyCommits {
                        count: entries.len() + 1,
                        ceiling,
                    });
                }
                entries.push((id, commit));
            }
        }

        entries.sort_by(|(a_id, a), (b_id, b)| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.repo.cmp(&b.repo))
                .then_with(|| a.hash.cmp(&b.hash))
                .then_with(|| a_id.cmp(b_id))
        });

        let mut store = Self {
            by_repo: vec![Vec::new(); repos.len()],
            repos,
            ..Default::default()
        };
        for (idx, (id, commit)) in entries.into_iter().enumerate() {
            store.by_repo[id].push(idx);
            store.by_day.entry(commit.day()).or_default().push(idx);
            store
                .by_author
                .entry(commit.email.clone())
                .or_default()
                .push(idx);
            store.owners.push(id);
            store.commits.push(commit);
        }

        info!(
            repos = store.repos.len(),
            commits = store.commits.len(),
            "commit store built"
        );
        Ok(store)
    }

    /// A new store holding only the commits that pass `filter`
    pub fn filtered(&self, filter: &ScanFilter) -> Self {
        let scans = self
            .repos
            .iter()
            .enumerate()
            .map(|(id, meta)| {
                let commits: Vec<Commit> = self
                    .repo_commits(id)
                    .filter(|c| filter.matches(c))
                    .cloned()
                    .collect();
                let mut meta = meta.clone();
                meta.observe(&commits);
                RepoScan { meta, commits }
            })
            .collect();

        // The result never holds more commits than `self`
        Self::build(scans, usize::MAX).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// All commits in canonical order
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// All repositories, sorted by path
    pub fn repos(&self) -> &[RepoMeta] {
        &self.repos
    }

    pub fn repo(&self, id: RepoId) -> Option<&RepoMeta> {
        self.repos.get(id)
    }

    /// Commits paired with the id of their repository
    pub fn entries(&self) -> impl Iterator<Item = (RepoId, &Commit)> {
        self.owners.iter().copied().zip(self.commits.iter())
    }

    /// Commits of one repository in canonical order
    pub fn repo_commits(&self, id: RepoId) -> impl Iterator<Item = &Commit> {
        self.by_repo
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.commits[i])
    }

    pub fn repo_commit_count(&self, id: RepoId) -> usize {
        self.by_repo.get(id).map_or(0, Vec::len)
    }

    /// Commits on one calendar day
    pub fn on_day(&self, day: NaiveDate) -> impl Iterator<Item = &Commit> {
        self.by_day
            .get(&day)
            .into_iter()
            .flatten()
            .map(move |&i| &self.commits[i])
    }

    /// Distinct repositories with at least one commit on `day`
    pub fn repos_on_day(&self, day: NaiveDate) -> usize {
        self.by_day.get(&day).map_or(0, |idx| {
            idx.iter()
                .map(|&i| self.owners[i])
                .collect::<HashSet<_>>()
                .len()
        })
    }

    /// Days with at least one commit, ascending, with their commit counts
    pub fn active_days(&self) -> impl Iterator<Item = (NaiveDate, usize)> + '_ {
        self.by_day.iter().map(|(day, idx)| (*day, idx.len()))
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.by_day.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.by_day.keys().next_back().copied()
    }

    /// Commits by one author (normalized email)
    pub fn by_author(&self, email: &str) -> impl Iterator<Item = &Commit> {
        self.by_author
            .get(email)
            .into_iter()
            .flatten()
            .map(move |&i| &self.commits[i])
    }

    /// Distinct author emails, ascending
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.by_author.keys().map(String::as_str)
    }
}
