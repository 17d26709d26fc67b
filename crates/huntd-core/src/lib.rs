//! huntd core - shared plumbing for the huntd analytics tools
//!
//! Configuration, standard paths, and bounded execution of external commands.
//! Nothing in here knows what a commit or a streak is.

pub mod config;
pub mod paths;
pub mod process;

pub use config::{Config, DayBoundary, DEFAULT_DAY_BOUNDARY};
pub use paths::Paths;
pub use process::{CancelToken, ProcessError};
