//! Repository discovery
//!
//! Walks target directories looking for git repository roots. A directory
//! holding a `.git` entry (directory or worktree file) is a repository and
//! is not descended into, so submodules and vendored clones are not counted
//! twice.

use huntd_core::Config;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;

/// Dependency caches, build output and toolchain directories never worth walking
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    "target",
    "build",
    "dist",
    ".gradle",
    ".dart_tool",
    "vendor",
    ".next",
    ".nuxt",
    "bin",
    "obj",
    ".tox",
    ".mypy_cache",
    ".ruff_cache",
    ".pytest_cache",
    "site-packages",
    ".cargo",
    ".rustup",
    "Pods",
];

/// Finds git repository roots below one or more target paths
#[derive(Debug, Clone)]
pub struct RepositoryLocator {
    max_depth: usize,
    extra_skip: Vec<String>,
}

impl Default for RepositoryLocator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RepositoryLocator {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            extra_skip: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth,
            extra_skip: config.extra_skip_dirs.clone(),
        }
    }

    /// Repository roots under `root`, sorted by path.
    ///
    /// Unreadable subdirectories are logged and skipped.
    pub fn locate(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let root = root
            .canonicalize()
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| ScanError::NoSuchPath(root.to_path_buf()))?;

        let mut repos = Vec::new();
        let mut walker = WalkDir::new(&root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_walk(e));

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(path = ?err.path(), "skipping unreadable directory: {}", err);
                    continue;
                }
            };

            if entry.path().join(".git").exists() {
                debug!(repo = %entry.path().display(), "found repository");
                repos.push(entry.into_path());
                walker.skip_current_dir();
            }
        }

        repos.sort();
        Ok(repos)
    }

    /// Repository roots under every target, deduplicated and sorted
    pub fn locate_all(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
        let mut found = BTreeSet::new();
        for root in roots {
            found.extend(self.locate(root)?);
        }
        Ok(found.into_iter().collect())
    }

    fn should_walk(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !(name.starts_with('.')
            || SKIP_DIRS.contains(&name.as_ref())
            || self.extra_skip.iter().any(|s| s == name.as_ref()))
    }
}
