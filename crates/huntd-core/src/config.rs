//! Configuration management for huntd

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths::Paths;

/// Which clock decides where one calendar day ends and the next begins.
///
/// Streaks, the heatmap, weekday splits and hour-of-day buckets all read the
/// civil time produced here, so a scan applies exactly one convention to every
/// commit regardless of the zone the commit was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Local time of the machine performing the scan
    Local,
    /// Coordinated universal time
    Utc,
}

/// Day boundary used when the config does not say otherwise
pub const DEFAULT_DAY_BOUNDARY: DayBoundary = DayBoundary::Local;

impl Default for DayBoundary {
    fn default() -> Self {
        DEFAULT_DAY_BOUNDARY
    }
}

impl DayBoundary {
    /// Wall-clock time of an instant under this convention
    pub fn civil<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> NaiveDateTime {
        match self {
            Self::Local => ts.with_timezone(&Local).naive_local(),
            Self::Utc => ts.naive_utc(),
        }
    }

    /// Calendar day an instant falls on
    pub fn day_of<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> NaiveDate {
        self.civil(ts).date()
    }

    /// "Today" as seen from `now`
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.day_of(&now)
    }
}

/// Global huntd configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Concurrent git history queries
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Time budget for all git queries against one repository (seconds)
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// git executable, looked up on PATH unless it is a path
    #[serde(default = "default_git_program")]
    pub git_program: String,

    /// Upper bound on commits held in one store
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// How deep the locator descends below each target path
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Directory names skipped in addition to the built-in noise list
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,

    /// Day boundary convention for every per-day derivation
    #[serde(default)]
    pub day_boundary: DayBoundary,

    /// Trailing weeks used to classify the velocity trend
    #[serde(default = "default_velocity_window_weeks")]
    pub velocity_window_weeks: usize,

    /// Relative weekly slope below which velocity counts as stable
    #[serde(default = "default_velocity_flat_threshold")]
    pub velocity_flat_threshold: f64,

    /// Number of file hotspots reported
    #[serde(default = "default_hotspot_limit")]
    pub hotspot_limit: usize,
}

fn default_workers() -> usize {
    8
}

fn default_query_timeout_secs() -> u64 {
    60
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_max_commits() -> usize {
    2_000_000
}

fn default_max_depth() -> usize {
    6
}

fn default_velocity_window_weeks() -> usize {
    8
}

fn default_velocity_flat_threshold() -> f64 {
    0.10
}

fn default_hotspot_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            query_timeout_secs: default_query_timeout_secs(),
            git_program: default_git_program(),
            max_commits: default_max_commits(),
            max_depth: default_max_depth(),
            extra_skip_dirs: Vec::new(),
            day_boundary: DayBoundary::default(),
            velocity_window_weeks: default_velocity_window_weeks(),
            velocity_flat_threshold: default_velocity_flat_threshold(),
            hotspot_limit: default_hotspot_limit(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from the standard location
    pub fn load_default() -> Result<Self> {
        Self::load(&Paths::new().config_file())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
