//! Lazy newest-first walk over commit history with per-commit tag lookup.

use tracing::{debug, warn};

use crate::error::GitError;

use super::commits::{CommitId, parse_log_line};
use super::provider::{HistoryLines, HistoryProvider};
use super::tags::Tag;

/// One walked commit and the tags pointing at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub commit: CommitId,
    pub tags: Vec<Tag>,
}

/// Walks the provider's history one commit at a time.
///
/// Tags are queried only for commits actually pulled from the iterator, so a
/// consumer that stops early avoids the remaining (costly) tag lookups.
pub struct HistoryWalker<'a, P: HistoryProvider + ?Sized> {
    provider: &'a P,
    lines: HistoryLines,
    first: Option<String>,
    exhausted: bool,
}

impl<'a, P: HistoryProvider + ?Sized> HistoryWalker<'a, P> {
    /// Start the history stream. Failing to open it aborts the run.
    ///
    /// The first line is read ahead: a stream that fails before yielding any
    /// line (bad revision, unborn HEAD, not a repository) is an error, not an
    /// empty history.
    pub fn start(provider: &'a P) -> Result<Self, GitError> {
        let mut lines = provider.stream_history()?;
        let first = lines.next().transpose().map_err(GitError::HistoryUnavailable)?;
        let exhausted = first.is_none();
        Ok(Self {
            provider,
            lines,
            first,
            exhausted,
        })
    }

    fn next_commit(&mut self) -> Option<CommitId> {
        let next = match self.first.take() {
            Some(line) => Some(Ok(line)),
            None => self.lines.next(),
        };
        let line = match next? {
            Ok(line) => line,
            Err(e) => {
                warn!("History stream ended early: {}", e);
                return None;
            }
        };

        let commit = parse_log_line(&line);
        if commit.is_none() {
            debug!("Blank history line, treating as end of stream");
        }
        commit
    }
}

impl<P: HistoryProvider + ?Sized> Iterator for HistoryWalker<'_, P> {
    type Item = Observation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let Some(commit) = self.next_commit() else {
            self.exhausted = true;
            return None;
        };

        let tags = self.provider.tags_at(&commit).unwrap_or_else(|e| {
            debug!(commit = %commit, error = %e, "Tag query failed, treating commit as untagged");
            Vec::new()
        });

        Some(Observation { commit, tags })
    }
}
