//! Focus score
//!
//! How many distinct repositories were touched on each active day. One
//! repository a day is maximal focus; the more repositories, the more
//! scattered the day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::CommitStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusDay {
    pub date: NaiveDate,
    pub repos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusScore {
    /// Active days only, ascending
    pub days: Vec<FocusDay>,
    pub mean_repos_per_day: f64,
    /// Fewest repositories; earliest on tie
    pub most_focused_day: Option<NaiveDate>,
    /// Most repositories; earliest on tie
    pub most_scattered_day: Option<NaiveDate>,
    pub interpretation: &'static str,
}

impl Default for FocusScore {
    fn default() -> Self {
        Self {
            days: Vec::new(),
            mean_repos_per_day: 0.0,
            most_focused_day: None,
            most_scattered_day: None,
            interpretation: "no data",
        }
    }
}

fn interpret(mean: f64) -> &'static str {
    if mean <= 1.5 {
        "deep focus"
    } else if mean <= 2.5 {
        "balanced"
    } else {
        "scattered"
    }
}

pub fn focus_score(store: &CommitStore) -> FocusScore {
    let days: Vec<FocusDay> = store
        .active_days()
        .map(|(date, _)| FocusDay {
            date,
            repos: store.repos_on_day(date),
        })
        .collect();
    if days.is_empty() {
        return FocusScore::default();
    }

    let mean = days.iter().map(|d| d.repos).sum::<usize>() as f64 / days.len() as f64;
    let most_focused_day = days.iter().min_by_key(|d| d.repos).map(|d| d.date);
    let most_scattered_day = days.iter().rev().max_by_key(|d| d.repos).map(|d| d.date);

    FocusScore {
        mean_repos_per_day: mean,
        most_focused_day,
        most_scattered_day,
        interpretation: interpret(mean),
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

    #[test]
    fn test_empty() {
        let f = focus_score(&CommitStore::default());
        assert_eq!(f.mean_repos_per_day, 0.0);
        assert_eq!(f.interpretation, "no data");
        assert!(f.days.is_empty());
    }

    #[test]
    fn test_single_repo_is_deep_focus() {
        let s = store(vec![scan(
            "r",
            (1..=5)
                .map(|i| commit("r", &i.to_string(), &format!("2025-01-0{}T10:00:00Z", i), vec![]))
                .collect(),
        )]);
        let f = focus_score(&s);
        assert_eq!(f.mean_repos_per_day, 1.0);
        assert_eq!(f.interpretation, "deep focus");
        assert_eq!(f.days.len(), 5);
    }

    #[test]
    fn test_multiple_repos() {
        let s = store(vec![
            scan(
                "a",
                vec![
                    commit("a", "1", "2025-01-01T10:00:00Z", vec![]),
                    commit("a", "2", "2025-01-01T11:00:00Z", vec![]),
                    commit("a", "3", "2025-01-02T10:00:00Z", vec![]),
                ],
            ),
            scan(
                "b",
                vec![
                    commit("b", "4", "2025-01-01T10:00:00Z", vec![]),
                    commit("b", "5", "2025-01-03T10:00:00Z", vec![]),
                ],
            ),
            scan("c", vec![commit("c", "6", "2025-01-01T12:00:00Z", vec![])]),
        ]);
        let f = focus_score(&s);
        let counts: Vec<_> = f.days.iter().map(|d| d.repos).collect();
        assert_eq!(counts, vec![3, 1, 1]);
        assert!((f.mean_repos_per_day - 5.0 / 3.0).abs() < 1e-9);
        assert_eq!(f.interpretation, "balanced");
        assert_eq!(f.most_scattered_day, Some(d("2025-01-01")));
        assert_eq!(f.most_focused_day, Some(d("2025-01-02")));
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(interpret(1.5), "deep focus");
        assert_eq!(interpret(2.5), "balanced");
        assert_eq!(interpret(2.6), "scattered");
    }
}
