//! File hotspots: where the churn concentrates

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::model::RepoId;
use crate::store::CommitStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotspot {
    /// `<repo>/<path>`
    pub path: String,
    /// Root of the owning repository; tells apart repositories sharing a name
    pub repo: PathBuf,
    pub churn: u64,
    /// Commits that touched the file
    pub touches: usize,
}

/// Files ranked by churn, then touches, then path; at most `limit` entries
pub fn file_hotspots(store: &CommitStore, limit: usize) -> Vec<Hotspot> {
    let mut by_file: HashMap<(RepoId, &str), (u64, usize)> = HashMap::new();
    for (id, commit) in store.entries() {
        for file in &commit.files {
            let entry = by_file.entry((id, file.path.as_str())).or_default();
            entry.0 += file.churn();
            entry.1 += 1;
        }
    }

    let mut hotspots: Vec<Hotspot> = by_file
        .into_iter()
        .filter_map(|((id, path), (churn, touches))| {
            let meta = store.repo(id)?;
            Some(Hotspot {
                path: format!("{}/{}", meta.name, path),
                repo: meta.path.clone(),
                churn,
                touches,
            })
        })
        .collect();
    hotspots.sort_by(|a, b| {
        b.churn
            .cmp(&a.churn)
            .then_with(|| b.touches.cmp(&a.touches))
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.repo.cmp(&b.repo))
    });
    hotspots.truncate(limit);
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileChange;
    use crate::store::tests::{commit, scan, store};

    #[test]
    fn test_empty() {
        assert!(file_hotspots(&CommitStore::default(), 10).is_empty());
    }

    #[test]
    fn test_prefixes_repo_and_aggregates() {
        let s = store(vec![scan(
            "myrepo",
            vec![
                commit(
                    "myrepo",
                    "1",
                    "2025-01-01T10:00:00Z",
                    vec![FileChange::new("src/main.py", 100, 0)],
                ),
                commit(
                    "myrepo",
                    "2",
                    "2025-01-02T10:00:00Z",
                    vec![FileChange::new("src/main.py", 200, 0)],
                ),
            ],
        )]);
        let hot = file_hotspots(&s, 10);
        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].path, "myrepo/src/main.py");
        assert_eq!(hot[0].churn, 300);
        assert_eq!(hot[0].touches, 2);
    }

    #[test]
    fn test_ranking_and_tie_breaks() {
        let s = store(vec![scan(
            "r",
            vec![
                commit("r", "1", "2025-01-01T10:00:00Z", vec![
                    FileChange::new("big.py", 1000, 500),
                    FileChange::new("b.py", 5, 5),
                    FileChange::new("a.py", 5, 5),
                ]),
                commit("r", "2", "2025-01-02T10:00:00Z", vec![
                    FileChange::new("often.py", 5, 0),
                ]),
                commit("r", "3", "2025-01-03T10:00:00Z", vec![
                    FileChange::new("often.py", 5, 0),
                ]),
            ],
        )]);
        let paths: Vec<_> = file_hotspots(&s, 10).into_iter().map(|h| h.path).collect();
        // often.py ties on churn but has more touches; a.py beats b.py by name
        assert_eq!(paths, vec!["r/big.py", "r/often.py", "r/a.py", "r/b.py"]);
    }

    #[test]
    fn test_same_named_repos_stay_apart() {
        let mut work = scan(
            "app",
            vec![commit(
                "app",
                "1",
                "2025-01-01T10:00:00Z",
                vec![FileChange::new("main.rs", 10, 0)],
            )],
        );
        work.meta.path = PathBuf::from("/work/app");
        let mut oss = scan(
            "app",
            vec![commit(
                "app",
                "1",
                "2025-01-02T10:00:00Z",
                vec![FileChange::new("main.rs", 4, 0)],
            )],
        );
        oss.meta.path = PathBuf::from("/oss/app");

        let hot = file_hotspots(&store(vec![work, oss]), 10);
        assert_eq!(hot.len(), 2);
        assert_eq!(hot[0].repo, PathBuf::from("/work/app"));
        assert_eq!(hot[0].churn, 10);
        assert_eq!(hot[1].repo, PathBuf::from("/oss/app"));
        assert!(hot.iter().all(|h| h.path == "app/main.rs"));
    }

    #[test]
    fn test_respects_limit() {
        let files = (0..20)
            .map(|i| FileChange::new(format!("file{}.py", i), i * 10, 0))
            .collect();
        let s = store(vec![scan("r", vec![commit("r", "1", "2025-01-01T10:00:00Z", files)])]);
        let hot = file_hotspots(&s, 5);
        assert_eq!(hot.len(), 5);
        assert_eq!(hot[0].path, "r/file19.py");
    }
}
