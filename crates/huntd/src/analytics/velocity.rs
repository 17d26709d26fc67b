//! Weekly velocity and trend
//!
//! Commits and lines changed are bucketed by ISO week over a dense range that
//! runs from the first active week up to the week containing `end`. The trend
//! is the least-squares slope of weekly commits over the window ending at the
//! week containing `trend_through`, relative to the window's mean: above
//! `+threshold` is up, below `-threshold` is down, anything else (or too
//! little history) is stable. Weeks after `trend_through` are reported but not
//! classified, which keeps an in-progress week from dragging the slope down.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::store::CommitStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// ISO week label, e.g. `2025-W03`
    pub week: String,
    /// Monday of the week
    pub start: NaiveDate,
    pub commits: usize,
    pub lines: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Velocity {
    pub weeks: Vec<WeekBucket>,
    pub trend: Trend,
    /// Weekly slope as a fraction of the window mean
    pub relative_slope: f64,
    pub peak_week: Option<String>,
    pub peak_commits: usize,
}

fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

fn week_label(day: NaiveDate) -> String {
    let iso = day.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

pub fn compute_velocity(
    store: &CommitStore,
    end: NaiveDate,
    trend_through: NaiveDate,
    window: usize,
    threshold: f64,
) -> Velocity {
    let (first, last) = match (store.first_day(), store.last_day()) {
        (Some(first), Some(last)) => (week_start(first), week_start(last.max(end))),
        _ => return Velocity::default(),
    };

    let mut weeks = Vec::new();
    let mut start = first;
    while start <= last {
        weeks.push(WeekBucket {
            week: week_label(start),
            start,
            commits: 0,
            lines: 0,
        });
        start += Duration::days(7);
    }
    for commit in store.commits() {
        let idx = ((week_start(commit.day()) - first).num_days() / 7) as usize;
        let bucket = &mut weeks[idx];
        bucket.commits += 1;
        bucket.lines += commit.churn();
    }

    // Earliest week wins ties
    let peak = weeks
        .iter()
        .rev()
        .max_by_key(|w| w.commits)
        .filter(|w| w.commits > 0);
    let peak_week = peak.map(|w| w.week.clone());
    let peak_commits = peak.map_or(0, |w| w.commits);

    let cutoff = week_start(trend_through);
    let series: Vec<f64> = weeks
        .iter()
        .take_while(|w| w.start <= cutoff)
        .map(|w| w.commits as f64)
        .collect();
    let (trend, relative_slope) = classify(&series, window, threshold);

    Velocity {
        weeks,
        trend,
        relative_slope,
        peak_week,
        peak_commits,
    }
}

/// Trend of the trailing `window` values
fn classify(series: &[f64], window: usize, threshold: f64) -> (Trend, f64) {
    if window < 2 || series.len() < window {
        return (Trend::Stable, 0.0);
    }
    let tail = &series[series.len() - window..];
    let n = tail.len() as f64;
    let mean = tail.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return (Trend::Stable, 0.0);
    }

    let x_mean = (n - 1.0) / 2.0;
    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in tail.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - mean);
        den += dx * dx;
    }
    let relative = (num / den) / mean;

    let trend = if relative > threshold {
        Trend::Up
    } else if relative < -threshold {
        Trend::Down
    } else {
        Trend::Stable
    };
    (trend, relative)
}
