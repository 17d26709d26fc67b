//! Month-by-month language evolution
//!
//! A cell is `None` when the language saw no commits that month and
//! `Some(lines)` otherwise, so "inactive" stays distinct from "touched with
//! zero churn". `None` serializes as `null`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::store::CommitStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSeries {
    pub language: String,
    /// One cell per entry of [`LanguageEvolution::months`]
    pub monthly: Vec<Option<u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageEvolution {
    /// Every month from the first to the last active one, as `YYYY-MM`
    pub months: Vec<String>,
    /// Ordered like `top_languages`
    pub series: Vec<LanguageSeries>,
    /// Languages by total lines changed, descending; ties by name
    pub top_languages: Vec<String>,
}

impl LanguageEvolution {
    pub fn cell(&self, language: &str, month: &str) -> Option<u64> {
        let col = self.months.iter().position(|m| m == month)?;
        self.series
            .iter()
            .find(|s| s.language == language)
            .and_then(|s| s.monthly[col])
    }
}

fn month_key(day: NaiveDate) -> (i32, u32) {
    (day.year(), day.month())
}

pub fn language_evolution(store: &CommitStore) -> LanguageEvolution {
    let (first, last) = match (store.first_day(), store.last_day()) {
        (Some(first), Some(last)) => (month_key(first), month_key(last)),
        _ => return LanguageEvolution::default(),
    };

    let mut months = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        months.push((year, month));
        (year, month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    }
    let column: HashMap<(i32, u32), usize> =
        months.iter().enumerate().map(|(i, m)| (*m, i)).collect();

    let mut cells: BTreeMap<&str, Vec<Option<u64>>> = BTreeMap::new();
    for commit in store.commits() {
        let col = column[&month_key(commit.day())];
        for file in &commit.files {
            let row = cells
                .entry(file.language.as_str())
                .or_insert_with(|| vec![None; months.len()]);
            *row[col].get_or_insert(0) += file.churn();
        }
    }

    let mut series: Vec<(u64, LanguageSeries)> = cells
        .into_iter()
        .map(|(language, monthly)| {
            let total = monthly.iter().flatten().sum();
            (
                total,
                LanguageSeries {
                    language: language.to_string(),
                    monthly,
                },
            )
        })
        .collect();
    series.sort_by(|(ta, a), (tb, b)| tb.cmp(ta).then_with(|| a.language.cmp(&b.language)));

    LanguageEvolution {
        months: months.iter().map(|(y, m)| format!("{:04}-{:02}", y, m)).collect(),
        top_languages: series.iter().map(|(_, s)| s.language.clone()).collect(),
        series: series.into_iter().map(|(_, s)| s).collect(),
    }
}
