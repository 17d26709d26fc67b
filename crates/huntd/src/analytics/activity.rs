//! When the work happens: hour-of-day and day-of-week patterns

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;

use crate::store::CommitStore;

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPattern {
    /// Commits per local hour, index 0-23
    pub commits_by_hour: Vec<usize>,
    /// Commits per weekday, Monday first
    pub commits_by_weekday: Vec<usize>,
    pub busiest_hour: Option<u32>,
    pub busiest_day: Option<&'static str>,
    /// Commits divided by days since the first active day (at least one)
    pub avg_commits_per_day: f64,
}

impl Default for ActivityPattern {
    fn default() -> Self {
        Self {
            commits_by_hour: vec![0; 24],
            commits_by_weekday: vec![0; 7],
            busiest_hour: None,
            busiest_day: None,
            avg_commits_per_day: 0.0,
        }
    }
}

impl ActivityPattern {
    /// Share of commits whose hour falls in `hours`, 0.0-1.0
    pub fn share_in_hours(&self, hours: std::ops::Range<usize>) -> f64 {
        let total: usize = self.commits_by_hour.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let part: usize = self.commits_by_hour[hours].iter().sum();
        part as f64 / total as f64
    }
}

/// Index of the largest bucket; the earliest wins ties
fn busiest(buckets: &[usize]) -> Option<usize> {
    buckets
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, count)| **count)
        .filter(|(_, count)| **count > 0)
        .map(|(i, _)| i)
}

pub fn activity_patterns(store: &CommitStore, today: NaiveDate) -> ActivityPattern {
    let mut pattern = ActivityPattern::default();
    let first = match store.first_day() {
        Some(first) => first,
        None => return pattern,
    };

    for commit in store.commits() {
        pattern.commits_by_hour[commit.local_time.hour() as usize] += 1;
        let weekday = commit.local_time.weekday().num_days_from_monday();
        pattern.commits_by_weekday[weekday as usize] += 1;
    }

    pattern.busiest_hour = busiest(&pattern.commits_by_hour).map(|h| h as u32);
    pattern.busiest_day = busiest(&pattern.commits_by_weekday).map(|d| DAYS[d]);

    let span = (today - first).num_days().max(1);
    pattern.avg_commits_per_day = store.len() as f64 / span as f64;
    pattern
}
