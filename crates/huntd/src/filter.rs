//! Date and author filtering
//!
//! Filters are validated up front and applied while commits are extracted,
//! so every commit that reaches the store already satisfies them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FilterError;
use crate::model::Commit;

/// Active `{since, until, author}` filter.
///
/// `since` and `until` are inclusive calendar days under the scan's day
/// boundary. `author` is a case-insensitive substring of the author name or
/// email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanFilter {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub author: Option<String>,
}

impl ScanFilter {
    /// Build a filter, rejecting an inverted date range
    pub fn new(
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        author: Option<String>,
    ) -> Result<Self, FilterError> {
        if let (Some(since), Some(until)) = (since, until) {
            if since > until {
                return Err(FilterError::InvertedRange { since, until });
            }
        }

        let author = author
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty());

        Ok(Self {
            since,
            until,
            author,
        })
    }

    /// Parse raw user input (dates as `YYYY-MM-DD`)
    pub fn parse(
        since: Option<&str>,
        until: Option<&str>,
        author: Option<&str>,
    ) -> Result<Self, FilterError> {
        let since = since.map(|s| parse_date("since", s)).transpose()?;
        let until = until.map(|s| parse_date("until", s)).transpose()?;
        Self::new(since, until, author.map(str::to_string))
    }

    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none() && self.author.is_none()
    }

    /// Whether a commit passes every active constraint
    pub fn matches(&self, commit: &Commit) -> bool {
        self.matches_day(commit.day()) && self.matches_author(&commit.author, &commit.email)
    }

    pub fn matches_day(&self, day: NaiveDate) -> bool {
        self.since.map_or(true, |since| day >= since)
            && self.until.map_or(true, |until| day <= until)
    }

    pub fn matches_author(&self, name: &str, email: &str) -> bool {
        match &self.author {
            Some(needle) => {
                name.to_lowercase().contains(needle.as_str())
                    || email.to_lowercase().contains(needle.as_str())
            }
            None => true,
        }
    }

    /// Human-readable description, empty when no filter is active
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(since) = self.since {
            parts.push(format!("since {}", since));
        }
        if let Some(until) = self.until {
            parts.push(format!("until {}", until));
        }
        if let Some(author) = &self.author {
            parts.push(format!("author: {}", author));
        }
        parts.join(", ")
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FilterError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use huntd_core::DayBoundary;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn commit(author: &str, email: &str, ts: &str) -> Commit {
        Commit::new(
            "repo",
            "h",
            author,
            email,
            DateTime::parse_from_rfc3339(ts).unwrap(),
            DayBoundary::Utc,
            vec![],
        )
    }

    #[test]
    fn test_parse_valid() {
        let filter =
            ScanFilter::parse(Some("2025-01-01"), Some("2025-01-31"), Some(" Ada ")).unwrap();
        assert_eq!(filter.since, Some(day("2025-01-01")));
        assert_eq!(filter.until, Some(day("2025-01-31")));
        assert_eq!(filter.author.as_deref(), Some("ada"));
    }

    #[test]
    fn test_parse_malformed_date() {
        let err = ScanFilter::parse(Some("01/02/2025"), None, None).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidDate {
                field: "since",
                value: "01/02/2025".to_string()
            }
        );
    }

    #[test]
    fn test_since_after_until_rejected() {
        let err = ScanFilter::parse(Some("2025-02-01"), Some("2025-01-01"), None).unwrap_err();
        assert!(matches!(err, FilterError::InvertedRange { .. }));
    }

    #[test]
    fn test_same_day_range_allowed() {
        assert!(ScanFilter::parse(Some("2025-02-01"), Some("2025-02-01"), None).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = ScanFilter::parse(Some("2025-01-02"), Some("2025-01-03"), None).unwrap();
        assert!(!filter.matches(&commit("a", "a@x", "2025-01-01T23:59:59Z")));
        assert!(filter.matches(&commit("a", "a@x", "2025-01-02T00:00:00Z")));
        assert!(filter.matches(&commit("a", "a@x", "2025-01-03T23:59:59Z")));
        assert!(!filter.matches(&commit("a", "a@x", "2025-01-04T00:00:00Z")));
    }

    #[test]
    fn test_author_matches_name_or_email_case_insensitive() {
        let filter = ScanFilter::parse(None, None, Some("LOVELACE")).unwrap();
        assert!(filter.matches(&commit("Ada Lovelace", "ada@x.org", "2025-01-01T00:00:00Z")));
        assert!(filter.matches(&commit("Ada", "lovelace@x.org", "2025-01-01T00:00:00Z")));
        assert!(!filter.matches(&commit("Grace", "grace@x.org", "2025-01-01T00:00:00Z")));
    }

    #[test]
    fn test_empty_author_is_no_filter() {
        let filter = ScanFilter::parse(None, None, Some("   ")).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.label(), "");
    }

    #[test]
    fn test_label() {
        let filter = ScanFilter::parse(Some("2025-01-01"), None, Some("ada")).unwrap();
        assert_eq!(filter.label(), "since 2025-01-01, author: ada");
    }
}
