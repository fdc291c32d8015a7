//! Run configuration, derived from CLI flags and the environment.
//!
//! Built once at startup and passed by reference; nothing here is global.

use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::git::Tag;
use crate::notes::TicketFilter;
use crate::range::SelectionMode;

/// Environment variable to override the git executable.
pub const GIT_ENV_VAR: &str = "TAGNOTES_GIT";

const DEFAULT_GIT: &str = "git";

/// Revision walked when none is given.
pub const DEFAULT_REV: &str = "HEAD";

/// Raw options as given on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub path: Option<PathBuf>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Negative means unbounded.
    pub tag_count: i64,
    pub find: Option<String>,
    pub rev: String,
    pub fetch: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            path: None,
            start: None,
            end: None,
            tag_count: -1,
            find: None,
            rev: DEFAULT_REV.to_string(),
            fetch: None,
        }
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo_path: PathBuf,
    pub git: PathBuf,
    pub rev: String,
    pub fetch_remote: Option<String>,
    pub mode: SelectionMode,
    pub filter: Option<TicketFilter>,
}

impl Config {
    /// Validate options and choose the selection mode.
    ///
    /// The filter pattern is compiled here so a bad pattern fails before any
    /// git command runs.
    pub fn from_options(options: RunOptions) -> Result<Self, ConfigError> {
        let repo_path = options
            .path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingPath)?;

        let mode = SelectionMode::from_flags(
            non_empty(options.start).map(Tag::from),
            non_empty(options.end).map(Tag::from),
            tag_limit(options.tag_count),
        )?;

        let filter = TicketFilter::from_pattern(options.find.as_deref())?;

        let rev = non_empty(Some(options.rev)).unwrap_or_else(|| DEFAULT_REV.to_string());

        Ok(Self {
            repo_path,
            git: git_executable(),
            rev,
            fetch_remote: non_empty(options.fetch),
            mode,
            filter,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Convert the tag-count flag to a limit; negative values mean unbounded.
pub fn tag_limit(tag_count: i64) -> Option<usize> {
    usize::try_from(tag_count).ok()
}

/// Get the git executable to run.
///
/// Reads from TAGNOTES_GIT if set, otherwise uses `git` from PATH.
/// Logs a warning if the variable is set but empty.
pub fn git_executable() -> PathBuf {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v),
        Ok(_) => {
            warn!("{} is set but empty, using default '{}'", GIT_ENV_VAR, DEFAULT_GIT);
            PathBuf::from(DEFAULT_GIT)
        }
        Err(_) => PathBuf::from(DEFAULT_GIT),
    }
}

/// Check that the git executable can be found.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed(git: &Path) -> Result<PathBuf, ConfigError> {
    which::which(git).map_err(|_| ConfigError::GitNotInstalled(git.display().to_string()))
}
