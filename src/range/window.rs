//! Ordered, duplicate-free commit window.

use std::collections::HashSet;

use crate::git::CommitId;

/// Commits selected for message extraction, newest first.
///
/// Pushing a commit that is already present is a no-op, so the window never
/// holds a commit twice and keeps the order in which commits were walked.
#[derive(Debug, Clone, Default)]
pub struct CommitWindow {
    commits: Vec<CommitId>,
    seen: HashSet<CommitId>,
}

impl CommitWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `commit`; returns false if it was already in the window.
    pub fn push(&mut self, commit: CommitId) -> bool {
        if !self.seen.insert(commit.clone()) {
            return false;
        }
        self.commits.push(commit);
        true
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitId> {
        self.commits.iter()
    }

    pub fn into_vec(self) -> Vec<CommitId> {
        self.commits
    }
}

impl PartialEq for CommitWindow {
    fn eq(&self, other: &Self) -> bool {
        self.commits == other.commits
    }
}

impl Eq for CommitWindow {}
