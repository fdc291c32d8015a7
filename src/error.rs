//! Error types for tagnotes modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while building the run configuration, before any history is walked.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("please provide the repository path with --path")]
    MissingPath,

    #[error("--end requires --start (the range needs both boundary tags)")]
    EndWithoutStart,

    #[error("Not a git repository: {path}: {source}")]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("git executable '{0}' not found. Install git or set TAGNOTES_GIT to its location.")]
    GitNotInstalled(String),

    #[error(transparent)]
    Filter(#[from] ExtractError),
}

/// Errors from git CLI operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to start commit history stream: {0}")]
    HistoryUnavailable(#[source] std::io::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from ticket-line extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid --find pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },
}
