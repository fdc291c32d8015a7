//! History provider capability and its git CLI implementation.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary with `-C <repo>`, inheriting the user's git config without changing
//! the process working directory.

use std::io::{self, BufRead, BufReader, Lines, Read};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::debug;

use crate::config::Config;
use crate::error::GitError;

use super::commits::CommitId;
use super::tags::{Tag, parse_tag_list};

/// Newest-first `<shortId> <summary>` lines.
pub type HistoryLines = Box<dyn Iterator<Item = io::Result<String>>>;

/// Source of commit history, tags, and messages.
///
/// This abstraction allows canned histories and mocks in tests.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryProvider {
    /// Start the newest-first history stream.
    fn stream_history(&self) -> Result<HistoryLines, GitError>;

    /// Tags pointing exactly at `commit`.
    fn tags_at(&self, commit: &CommitId) -> Result<Vec<Tag>, GitError>;

    /// Full commit message of `commit`.
    fn message_of(&self, commit: &CommitId) -> Result<String, GitError>;
}

/// Provider that calls the real git CLI.
#[derive(Debug, Clone)]
pub struct GitCli {
    git: PathBuf,
    repo: PathBuf,
    rev: String,
}

impl GitCli {
    pub fn new(git: impl Into<PathBuf>, repo: impl Into<PathBuf>, rev: impl Into<String>) -> Self {
        Self {
            git: git.into(),
            repo: repo.into(),
            rev: rev.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.git, &config.repo_path, &config.rev)
    }

    /// Fetch tags (and the commits they need) from `remote`.
    pub fn fetch_tags(&self, remote: &str) -> Result<(), GitError> {
        self.run_git(&["fetch", "--tags", remote], "fetch")?;
        Ok(())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git);
        cmd.arg("-C").arg(&self.repo);
        cmd
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl HistoryProvider for GitCli {
    fn stream_history(&self) -> Result<HistoryLines, GitError> {
        let mut child = self
            .command()
            .args(["log", "--oneline", "--no-color", &self.rev])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(GitError::HistoryUnavailable)?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GitError::HistoryUnavailable(io::Error::other(
                "git log stdout was not captured",
            )));
        };

        debug!(repo = %self.repo.display(), rev = %self.rev, "Started history stream");

        Ok(Box::new(HistoryStream {
            child,
            lines: BufReader::new(stdout).lines(),
            finished: false,
        }))
    }

    fn tags_at(&self, commit: &CommitId) -> Result<Vec<Tag>, GitError> {
        let stdout = self.run_git(&["tag", "--points-at", commit.as_str()], "tag --points-at")?;
        Ok(parse_tag_list(&stdout))
    }

    fn message_of(&self, commit: &CommitId) -> Result<String, GitError> {
        self.run_git(&["show", "--quiet", "--format=%B", commit.as_str()], "show")
    }
}

/// Lines read lazily from a running `git log`.
///
/// A failing `git log` surfaces as one trailing error item. The child is
/// killed and reaped on drop, so stopping early leaves no process behind.
struct HistoryStream {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    finished: bool,
}

impl HistoryStream {
    fn exit_error(&mut self) -> Option<io::Error> {
        let mut stderr = String::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }

        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(io::Error::other(format!(
                "git log exited with {}: {}",
                status,
                stderr.trim()
            ))),
            Err(e) => Some(e),
        }
    }
}

impl Iterator for HistoryStream {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(line) => Some(line),
            None => {
                self.finished = true;
                self.exit_error().map(Err)
            }
        }
    }
}

impl Drop for HistoryStream {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
