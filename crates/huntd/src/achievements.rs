//! Achievements
//!
//! A fixed table of badge conditions evaluated against one
//! [`AnalyticsResult`]. Nothing is persisted; every run re-derives the
//! unlock state from scratch. Adding a badge means adding a row.

use serde::Serialize;

use crate::analytics::AnalyticsResult;

/// One row of the achievement table
pub struct AchievementDef {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: fn(&AnalyticsResult) -> bool,
}

/// Evaluated state of one achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        name: "Century",
        icon: "💯",
        description: "100-day coding streak",
        unlocked: |r| r.streaks.longest >= 100,
    },
    AchievementDef {
        name: "Marathon",
        icon: "🏃",
        description: "365-day coding streak",
        unlocked: |r| r.streaks.longest >= 365,
    },
    AchievementDef {
        name: "Prolific",
        icon: "🚀",
        description: "1000+ total commits",
        unlocked: |r| r.totals.commits >= 1000,
    },
    AchievementDef {
        name: "Night Owl",
        icon: "🦉",
        description: "50%+ of commits between midnight and 6am",
        unlocked: |r| r.activity.share_in_hours(0..6) >= 0.5,
    },
    AchievementDef {
        name: "Early Bird",
        icon: "🐦",
        description: "50%+ of commits between 5am and 9am",
        unlocked: |r| r.activity.share_in_hours(5..9) >= 0.5,
    },
    AchievementDef {
        name: "Weekend Warrior",
        icon: "⚔️",
        description: "40%+ of commits on weekends",
        unlocked: |r| r.totals.commits > 0 && r.workday_split.weekend_pct >= 40.0,
    },
    AchievementDef {
        name: "Polyglot",
        icon: "🌍",
        description: "5+ languages with 100+ lines each",
        unlocked: |r| r.languages.iter().filter(|l| l.lines >= 100).count() >= 5,
    },
    AchievementDef {
        name: "Diversified",
        icon: "🌳",
        description: "10+ active repositories",
        unlocked: |r| r.totals.active_repos >= 10,
    },
    AchievementDef {
        name: "Monorepo Monster",
        icon: "🐘",
        description: "A single repository with 500+ commits",
        unlocked: |r| r.repos.iter().any(|repo| repo.commits >= 500),
    },
    AchievementDef {
        name: "Clean Freak",
        icon: "✨",
        description: "Every repository scores 80+ health",
        unlocked: |r| !r.repos.is_empty() && r.repos.iter().all(|repo| repo.health.total >= 80),
    },
];

/// Evaluate every achievement against `result`, in table order
pub fn evaluate_achievements(result: &AnalyticsResult) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .map(|def| Achievement {
            name: def.name,
            icon: def.icon,
            description: def.description,
            unlocked: (def.unlocked)(result),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{analyze, AnalysisContext, LanguageShare};
    use crate::filter::ScanFilter;
    use crate::store::CommitStore;
    use chrono::Utc;
    use huntd_core::Config;

    fn empty_result() -> AnalyticsResult {
        let ctx = AnalysisContext::new(&Config::default(), &ScanFilter::default(), Utc::now());
        analyze(&CommitStore::default(), &ctx)
    }

    fn unlocked(result: &AnalyticsResult) -> Vec<&'static str> {
        evaluate_achievements(result)
            .into_iter()
            .filter(|a| a.unlocked)
            .map(|a| a.name)
            .collect()
    }

    #[test]
    fn test_table_has_ten_unique_entries() {
        let names: std::collections::HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.name).collect();
        assert_eq!(ACHIEVEMENTS.len(), 10);
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_empty_result_unlocks_nothing() {
        let achievements = evaluate_achievements(&empty_result());
        assert_eq!(achievements.len(), 10);
        assert!(achievements.iter().all(|a| !a.unlocked));
    }

    #[test]
    fn test_streak_thresholds() {
        let mut result = empty_result();
        result.streaks.longest = 99;
        assert!(unlocked(&result).is_empty());
        result.streaks.longest = 100;
        assert_eq!(unlocked(&result), vec!["Century"]);
        result.streaks.longest = 365;
        assert_eq!(unlocked(&result), vec!["Century", "Marathon"]);
    }

    #[test]
    fn test_night_owl_and_early_bird_overlap_at_five() {
        let mut result = empty_result();
        result.activity.commits_by_hour[5] = 10;
        assert_eq!(unlocked(&result), vec!["Night Owl", "Early Bird"]);

        result.activity.commits_by_hour[12] = 11;
        assert!(unlocked(&result).is_empty());
    }

    #[test]
    fn test_polyglot_counts_only_substantial_languages() {
        let mut result = empty_result();
        result.languages = ["Rust", "Go", "Python", "TypeScript", "Shell"]
            .iter()
            .map(|l| LanguageShare {
                language: l.to_string(),
                lines: 100,
                percent: 20.0,
            })
            .collect();
        assert_eq!(unlocked(&result), vec!["Polyglot"]);

        result.languages[4].lines = 99;
        assert!(unlocked(&result).is_empty());
    }

    #[test]
    fn test_weekend_and_volume() {
        let mut result = empty_result();
        result.totals.commits = 1000;
        result.totals.active_repos = 10;
        result.workday_split.weekend_pct = 40.0;
        assert_eq!(
            unlocked(&result),
            vec!["Prolific", "Weekend Warrior", "Diversified"]
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut result = empty_result();
        result.streaks.longest = 120;
        assert_eq!(evaluate_achievements(&result), evaluate_achievements(&result));
    }
}
