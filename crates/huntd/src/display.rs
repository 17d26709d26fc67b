//! Display and formatting utilities
//!
//! Plain-text rendering of a [`ScanReport`]: bars, heat glyphs and the
//! summary the binary prints when `--json` is not given.

use std::fmt::Write;

use crate::achievements::Achievement;
use crate::analytics::{AnalyticsResult, Trend};
use crate::pipeline::{Comparison, ScanReport};

/// Escape sequences for the few colours the summary uses
#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

const ANSI: Colors = Colors {
    red: "\x1b[0;31m",
    green: "\x1b[0;32m",
    yellow: "\x1b[0;33m",
    cyan: "\x1b[0;36m",
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    reset: "\x1b[0m",
};

const PLAIN: Colors = Colors {
    red: "",
    green: "",
    yellow: "",
    cyan: "",
    bold: "",
    dim: "",
    reset: "",
};

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            ANSI
        } else {
            PLAIN
        }
    }

    /// Escapes when stdout is a terminal, empty strings when piped
    pub fn auto() -> Self {
        Self::new(stdout_is_terminal())
    }
}

#[cfg(unix)]
fn stdout_is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
fn stdout_is_terminal() -> bool {
    true
}

/// Draw a simple bar chart
pub fn draw_bar(value: u64, max: u64, width: usize) -> String {
    let max = max.max(1);
    let filled = ((value as u128 * width as u128 / max as u128) as usize).min(width);
    let empty = width - filled;

    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(empty))
}

/// Heat intensity for a day's commit count: 0, 1-2, 3-5, 6+
pub fn heat_level(count: usize) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}

pub fn heat_glyph(count: usize) -> char {
    match heat_level(count) {
        0 => '\u{00b7}',
        1 => '\u{2591}',
        2 => '\u{2592}',
        _ => '\u{2588}',
    }
}

/// Format a section header
pub fn section_header(title: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.cyan, title, colors.reset)
}

/// Format a bold title
pub fn title(text: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.bold, text, colors.reset)
}

fn health_color<'a>(score: u8, colors: &'a Colors) -> &'a str {
    if score >= 70 {
        colors.green
    } else if score >= 40 {
        colors.yellow
    } else {
        colors.red
    }
}

fn trend_arrow(trend: Trend, colors: &Colors) -> String {
    match trend {
        Trend::Up => format!("{}^ up{}", colors.green, colors.reset),
        Trend::Down => format!("{}v down{}", colors.red, colors.reset),
        Trend::Stable => format!("{}= stable{}", colors.yellow, colors.reset),
    }
}

/// Last `weeks` weeks of the heatmap as one line of glyphs
pub fn heat_strip(analytics: &AnalyticsResult, weeks: usize) -> String {
    let days = &analytics.heatmap.days;
    let skip = days.len().saturating_sub(weeks * 7);
    days[skip..].iter().map(|d| heat_glyph(d.count)).collect()
}

pub fn format_achievements(achievements: &[Achievement], colors: &Colors) -> String {
    let mut out = String::new();
    for a in achievements {
        if a.unlocked {
            let _ = writeln!(
                out,
                "  {} {}{}{}  {}",
                a.icon, colors.bold, a.name, colors.reset, a.description
            );
        } else {
            let _ = writeln!(
                out,
                "  {}\u{25cb} {}  {}{}",
                colors.dim, a.name, a.description, colors.reset
            );
        }
    }
    out
}

/// Compact multi-section summary of one scan
pub fn format_summary(report: &ScanReport, colors: &Colors) -> String {
    let a = &report.analytics;
    let mut out = String::new();

    let _ = writeln!(out, "{}", title(&format!("huntd: {}", report.target), colors));
    let label = report.filter.label();
    if !label.is_empty() {
        let _ = writeln!(out, "{}{}{}", colors.dim, label, colors.reset);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Totals", colors));
    let _ = writeln!(out, "  Repositories:  {} ({} active)", a.totals.repos, a.totals.active_repos);
    if a.totals.degraded_repos > 0 {
        let _ = writeln!(
            out,
            "  {}Unreadable:    {}{}",
            colors.red, a.totals.degraded_repos, colors.reset
        );
    }
    let _ = writeln!(out, "  Commits:       {}", a.totals.commits);
    let _ = writeln!(
        out,
        "  Lines added:   {}{}{}",
        colors.green, a.totals.lines_added, colors.reset
    );
    let _ = writeln!(
        out,
        "  Lines removed: {}{}{}",
        colors.red, a.totals.lines_removed, colors.reset
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Streaks", colors));
    let _ = writeln!(out, "  Current: {} days", a.streaks.current);
    let _ = writeln!(out, "  Longest: {} days", a.streaks.longest);
    let _ = writeln!(out, "  Today:   {} commits", a.streaks.today_commits);
    if !a.heatmap.days.is_empty() {
        let _ = writeln!(out, "  {}", heat_strip(a, 8));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", section_header("Velocity", colors));
    let _ = writeln!(out, "  Trend: {}", trend_arrow(a.velocity.trend, colors));
    if let Some(week) = &a.velocity.peak_week {
        let _ = writeln!(out, "  Peak:  {} ({} commits)", week, a.velocity.peak_commits);
    }
    let _ = writeln!(
        out,
        "  Focus: {:.1} repos/day ({})",
        a.focus.mean_repos_per_day, a.focus.interpretation
    );
    let _ = writeln!(out, "  Weekend share: {:.0}%", a.workday_split.weekend_pct);
    let _ = writeln!(out);

    if !a.languages.is_empty() {
        let _ = writeln!(out, "{}", section_header("Languages", colors));
        let max = a.languages[0].lines;
        for lang in a.languages.iter().take(5) {
            let _ = writeln!(
                out,
                "  {:<12} {} {:>5.1}%",
                lang.language,
                draw_bar(lang.lines, max, 20),
                lang.percent
            );
        }
        let _ = writeln!(out);
    }

    if !a.repos.is_empty() {
        let _ = writeln!(out, "{}", section_header("Repositories", colors));
        for repo in &a.repos {
            let _ = writeln!(
                out,
                "  {:<24} {:>6} commits  health {}{:>3}{}{}",
                repo.name,
                repo.commits,
                health_color(repo.health.total, colors),
                repo.health.total,
                colors.reset,
                if repo.status.is_degraded() { "  (unreadable)" } else { "" }
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", section_header("Achievements", colors));
    out.push_str(&format_achievements(&report.achievements, colors));
    out
}

/// Side-by-side headline numbers for two scans
pub fn format_comparison(cmp: &Comparison, colors: &Colors) -> String {
    let (l, r) = (&cmp.left.analytics, &cmp.right.analytics);
    let mut out = String::new();
    let _ = writeln!(out, "{}", title("huntd compare", colors));
    let _ = writeln!(out, "  {:<16} {:>14} {:>14}", "", cmp.left.target, cmp.right.target);

    let rows: [(&str, String, String); 7] = [
        ("Repositories", l.totals.repos.to_string(), r.totals.repos.to_string()),
        ("Commits", l.totals.commits.to_string(), r.totals.commits.to_string()),
        ("Lines added", l.totals.lines_added.to_string(), r.totals.lines_added.to_string()),
        ("Lines removed", l.totals.lines_removed.to_string(), r.totals.lines_removed.to_string()),
        ("Longest streak", l.streaks.longest.to_string(), r.streaks.longest.to_string()),
        ("Trend", l.velocity.trend.as_str().to_string(), r.velocity.trend.as_str().to_string()),
        ("Top language", top_language(l), top_language(r)),
    ];
    for (name, left, right) in rows {
        let _ = writeln!(out, "  {:<16} {:>14} {:>14}", name, left, right);
    }
    out
}

fn top_language(a: &AnalyticsResult) -> String {
    a.languages
        .first()
        .map(|l| l.language.clone())
        .unwrap_or_else(|| "-".to_string())
}
