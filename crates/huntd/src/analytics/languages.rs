//! Language breakdown by lines changed

use serde::Serialize;
use std::collections::BTreeMap;

use super::percent;
use crate::store::CommitStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    /// Lines added plus removed
    pub lines: u64,
    /// Share of the grand total, 0-100
    pub percent: f64,
}

/// Lines changed per language, largest first; ties by language name
pub fn language_breakdown(store: &CommitStore) -> Vec<LanguageShare> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for file in store.commits().iter().flat_map(|c| &c.files) {
        *totals.entry(file.language.as_str()).or_default() += file.churn();
    }
    let grand_total: u64 = totals.values().sum();

    let mut shares: Vec<LanguageShare> = totals
        .into_iter()
        .map(|(language, lines)| LanguageShare {
            language: language.to_string(),
            lines,
            percent: percent(lines, grand_total),
        })
        .collect();
    shares.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.language.cmp(&b.language)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileChange;
    use crate::store::tests::{commit, scan, store};

    #[test]
    fn test_breakdown_sorted_with_percentages() {
        let s = store(vec![scan(
            "r",
            vec![
                commit(
                    "r",
                    "1",
                    "2025-01-01T10:00:00Z",
                    vec![FileChange::new("a.py", 50, 10), FileChange::new("b.js", 20, 0)],
                ),
                commit(
                    "r",
                    "2",
                    "2025-01-02T10:00:00Z",
                    vec![FileChange::new("c.rs", 15, 5), FileChange::new("d.py", 0, 0)],
                ),
            ],
        )]);
        let shares = language_breakdown(&s);
        let names: Vec<_> = shares.iter().map(|l| l.language.as_str()).collect();
        // JavaScript and Rust tie on 20 lines
        assert_eq!(names, vec!["Python", "JavaScript", "Rust"]);
        assert_eq!(shares[0].lines, 60);
        assert_eq!(shares[0].percent, 60.0);

        let sum: f64 = shares.iter().map(|l| l.percent).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_total_does_not_divide_by_zero() {
        let s = store(vec![scan(
            "r",
            vec![commit("r", "1", "2025-01-01T10:00:00Z", vec![FileChange::new("a.py", 0, 0)])],
        )]);
        let shares = language_breakdown(&s);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].percent, 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(language_breakdown(&CommitStore::default()).is_empty());
    }
}
