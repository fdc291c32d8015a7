//! Repository validation and branch reporting using git2-rs.

use std::path::Path;

use git2::Repository;

use crate::error::ConfigError;

/// Open the repository at `path`, failing if it is not a git repository.
pub fn open_repository(path: &Path) -> Result<Repository, ConfigError> {
    Repository::open(path).map_err(|source| ConfigError::NotARepository {
        path: path.to_path_buf(),
        source,
    })
}

/// Get the current branch name, or `None` for a detached or unborn HEAD.
pub fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    head.shorthand().map(String::from)
}
