//! Daily commit heatmap
//!
//! Raw per-day counts over a dense date range. Bucketing counts into colour
//! intensities is left to whoever draws it.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::store::CommitStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: usize,
}

/// Day → commit count, with every day of the range present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: Vec<HeatmapDay>,
}

impl Heatmap {
    /// Commits on `day`, 0 outside the range
    pub fn count(&self, day: NaiveDate) -> usize {
        match self.start {
            Some(start) if day >= start => self
                .days
                .get((day - start).num_days() as usize)
                .map_or(0, |d| d.count),
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.days.iter().map(|d| d.count).sum()
    }

    pub fn max(&self) -> usize {
        self.days.iter().map(|d| d.count).max().unwrap_or(0)
    }
}

/// Heatmap over the filter window, falling back to the observed range for
/// any bound the filter leaves open.
pub fn compute_heatmap(
    store: &CommitStore,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Heatmap {
    let start = since.or_else(|| store.first_day());
    let end = until.or_else(|| store.last_day());
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => return Heatmap::default(),
    };

    let mut days = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut day = start;
    while day <= end {
        days.push(HeatmapDay {
            date: day,
            count: store.on_day(day).count(),
        });
        day += Duration::days(1);
    }

    Heatmap {
        start: Some(start),
        end: Some(end),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{commit, scan, store};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> CommitStore {
        store(vec![
            scan(
                "a",
                vec![
                    commit("a", "1", "2025-01-01T09:00:00Z", vec![]),
                    commit("a", "2", "2025-01-02T09:00:00Z", vec![]),
                    commit("a", "3", "2025-01-04T09:00:00Z", vec![]),
                ],
            ),
            scan("b", vec![commit("b", "4", "2025-01-04T18:00:00Z", vec![])]),
        ])
    }

    #[test]
    fn test_dense_range_with_zero_days() {
        let map = compute_heatmap(&sample(), None, None);
        assert_eq!(map.start, Some(d("2025-01-01")));
        assert_eq!(map.end, Some(d("2025-01-04")));
        let counts: Vec<_> = map.days.iter().map(|x| x.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 2]);
        assert_eq!(map.count(d("2025-01-03")), 0);
        assert_eq!(map.count(d("2025-01-04")), 2);
        assert_eq!(map.count(d("2024-12-31")), 0);
        assert_eq!(map.max(), 2);
    }

    #[test]
    fn test_total_matches_commit_count() {
        let s = sample();
        assert_eq!(compute_heatmap(&s, None, None).total(), s.len());
    }

    #[test]
    fn test_filter_window_extends_range() {
        let map = compute_heatmap(&sample(), Some(d("2024-12-30")), Some(d("2025-01-05")));
        assert_eq!(map.days.len(), 7);
        assert_eq!(map.days[0].count, 0);
        assert_eq!(map.total(), 4);
    }

    #[test]
    fn test_empty() {
        let map = compute_heatmap(&CommitStore::default(), None, None);
        assert!(map.days.is_empty());
        assert_eq!(map.total(), 0);
        assert_eq!(map.max(), 0);
    }
}
