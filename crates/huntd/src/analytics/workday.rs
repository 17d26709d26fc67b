//! Weekday versus weekend split

use chrono::{Datelike, Weekday};
use serde::Serialize;

use super::percent;
use crate::store::CommitStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkdaySplit {
    pub weekday_commits: usize,
    pub weekend_commits: usize,
    pub weekday_pct: f64,
    pub weekend_pct: f64,
    pub weekday_lines: u64,
    pub weekend_lines: u64,
    pub weekday_lines_pct: f64,
    pub weekend_lines_pct: f64,
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn workday_split(store: &CommitStore) -> WorkdaySplit {
    let mut split = WorkdaySplit::default();
    for commit in store.commits() {
        if is_weekend(commit.local_time.weekday()) {
            split.weekend_commits += 1;
            split.weekend_lines += commit.churn();
        } else {
            split.weekday_commits += 1;
            split.weekday_lines += commit.churn();
        }
    }

    let commits = (split.weekday_commits + split.weekend_commits) as u64;
    let lines = split.weekday_lines + split.weekend_lines;
    split.weekday_pct = percent(split.weekday_commits as u64, commits);
    split.weekend_pct = percent(split.weekend_commits as u64, commits);
    split.weekday_lines_pct = percent(split.weekday_lines, lines);
    split.weekend_lines_pct = percent(split.weekend_lines, lines);
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileChange;
    use crate::store::tests::{commit, scan, store};

    #[test]
    fn test_empty() {
        assert_eq!(workday_split(&CommitStore::default()), WorkdaySplit::default());
    }

    #[test]
    fn test_split_counts_and_lines() {
        // 2025-01-03 is a Friday, 2025-01-04 a Saturday, 2025-01-05 a Sunday
        let s = store(vec![scan(
            "r",
            vec![
                commit("r", "1", "2025-01-03T10:00:00Z", vec![FileChange::new("a.rs", 30, 0)]),
                commit("r", "2", "2025-01-03T11:00:00Z", vec![FileChange::new("a.rs", 30, 0)]),
                commit("r", "3", "2025-01-04T10:00:00Z", vec![FileChange::new("a.rs", 10, 0)]),
                commit("r", "4", "2025-01-05T10:00:00Z", vec![FileChange::new("a.rs", 20, 10)]),
            ],
        )]);
        let split = workday_split(&s);
        assert_eq!(split.weekday_commits, 2);
        assert_eq!(split.weekend_commits, 2);
        assert_eq!(split.weekday_pct, 50.0);
        assert_eq!(split.weekday_lines, 60);
        assert_eq!(split.weekend_lines, 40);
        assert_eq!(split.weekend_lines_pct, 40.0);
        assert!((split.weekday_pct + split.weekend_pct - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_day_follows_boundary_not_commit_offset() {
        // Friday 23:30 at -05:00 is Saturday in UTC
        let s = store(vec![scan(
            "r",
            vec![commit("r", "1", "2025-01-03T23:30:00-05:00", vec![])],
        )]);
        assert_eq!(workday_split(&s).weekend_commits, 1);
    }
}
