//! Coding streaks
//!
//! A streak is a run of consecutive calendar days with at least one commit.
//! The current streak ends today, or yesterday when nothing has been
//! committed yet today, so an unfinished day does not reset it.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::store::CommitStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    /// Consecutive active days ending today (or yesterday)
    pub current: u32,
    /// Longest run anywhere in the history
    pub longest: u32,
    /// Commits made today
    pub today_commits: usize,
}

pub fn compute_streaks(store: &CommitStore, today: NaiveDate) -> Streaks {
    let days: BTreeSet<NaiveDate> = store.active_days().map(|(day, _)| day).collect();
    if days.is_empty() {
        return Streaks::default();
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in &days {
        run = match prev {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    let mut check = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut current = 0u32;
    while days.contains(&check) {
        current += 1;
        check -= Duration::days(1);
    }

    Streaks {
        current,
        longest,
        today_commits: store.on_day(today).count(),
    }
}
