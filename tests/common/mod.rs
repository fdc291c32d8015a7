//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io;

use git2::{Oid, Repository, Signature};

use tagnotes::git::provider::HistoryLines;
use tagnotes::{CommitId, GitCli, GitError, HistoryProvider, Tag};

/// A canned commit for [`FixtureHistory`].
#[derive(Debug, Clone)]
pub struct FixtureCommit {
    pub id: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub message: String,
}

/// In-memory history provider returning canned fixtures, newest first.
#[derive(Debug, Default)]
pub struct FixtureHistory {
    commits: Vec<FixtureCommit>,
    failing_tags: HashSet<String>,
    failing_messages: HashSet<String>,
    tag_queries: Cell<usize>,
    message_queries: RefCell<Vec<String>>,
}

impl FixtureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an older commit with the given tags and a message equal to its summary.
    pub fn commit(mut self, id: &str, tags: &[&str]) -> Self {
        self.commits.push(FixtureCommit {
            id: id.to_string(),
            summary: format!("summary of {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            message: format!("summary of {}", id),
        });
        self
    }

    /// Append an older commit with an explicit message.
    pub fn commit_with_message(mut self, id: &str, tags: &[&str], message: &str) -> Self {
        let summary = message.lines().next().unwrap_or_default().to_string();
        self.commits.push(FixtureCommit {
            id: id.to_string(),
            summary,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            message: message.to_string(),
        });
        self
    }

    /// Make the tag query for `id` fail.
    pub fn failing_tags(mut self, id: &str) -> Self {
        self.failing_tags.insert(id.to_string());
        self
    }

    /// Make the message fetch for `id` fail.
    pub fn failing_message(mut self, id: &str) -> Self {
        self.failing_messages.insert(id.to_string());
        self
    }

    /// Number of tag queries made so far.
    pub fn tag_queries(&self) -> usize {
        self.tag_queries.get()
    }

    /// Commit ids whose messages were fetched, in order.
    pub fn message_queries(&self) -> Vec<String> {
        self.message_queries.borrow().clone()
    }

    fn find(&self, commit: &CommitId) -> Option<&FixtureCommit> {
        self.commits.iter().find(|c| c.id == commit.as_str())
    }

    fn failure(operation: &str, commit: &CommitId) -> GitError {
        GitError::NonZeroExit {
            operation: operation.to_string(),
            code: Some(128),
            stderr: format!("fatal: bad object {}", commit),
        }
    }
}

impl HistoryProvider for FixtureHistory {
    fn stream_history(&self) -> Result<HistoryLines, GitError> {
        let lines: Vec<io::Result<String>> = self
            .commits
            .iter()
            .map(|c| Ok(format!("{} {}", c.id, c.summary)))
            .collect();
        let stream: HistoryLines = Box::new(lines.into_iter());
        Ok(stream)
    }

    fn tags_at(&self, commit: &CommitId) -> Result<Vec<Tag>, GitError> {
        self.tag_queries.set(self.tag_queries.get() + 1);
        if self.failing_tags.contains(commit.as_str()) {
            return Err(Self::failure("tag --points-at", commit));
        }
        Ok(self
            .find(commit)
            .map(|c| c.tags.iter().map(|t| Tag::from(t.as_str())).collect())
            .unwrap_or_default())
    }

    fn message_of(&self, commit: &CommitId) -> Result<String, GitError> {
        self.message_queries.borrow_mut().push(commit.to_string());
        if self.failing_messages.contains(commit.as_str()) {
            return Err(Self::failure("show", commit));
        }
        Ok(self.find(commit).map(|c| c.message.clone()).unwrap_or_default())
    }
}

/// Commit ids of a selection window as plain strings.
pub fn window_ids(selection: &tagnotes::Selection) -> Vec<String> {
    selection.window.iter().map(|c| c.to_string()).collect()
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// A git CLI provider walking this repository's HEAD.
    pub fn cli(&self) -> GitCli {
        GitCli::new("git", self.dir.path(), "HEAD")
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();

        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("notes.txt");
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new("notes.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = self.signature();
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, message, false)
            .expect("Failed to create annotated tag");
    }
}

/// Whether a short commit id printed by git abbreviates `oid`.
pub fn is_short_id_of(short: &str, oid: Oid) -> bool {
    !short.is_empty() && oid.to_string().starts_with(short)
}
