//! Commit identifiers and `git log --oneline` line parsing.

use std::fmt;

use serde::Serialize;

/// Short commit identifier as printed by `git log --oneline`.
///
/// Opaque: commits are ordered only by their position in the walked history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Extract the commit id from a `<shortId> <summary>` line.
///
/// Returns `None` for empty or whitespace-only lines, which end the history stream.
pub fn parse_log_line(line: &str) -> Option<CommitId> {
    line.split_whitespace().next().map(CommitId::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_line_takes_leading_token() {
        let id = parse_log_line("a1b2c3d fix(auth): resolve login bug #4521\n");
        assert_eq!(id, Some(CommitId::from("a1b2c3d")));
    }

    #[test]
    fn test_parse_log_line_id_only() {
        assert_eq!(parse_log_line("a1b2c3d"), Some(CommitId::from("a1b2c3d")));
    }

    #[test]
    fn test_parse_log_line_tab_separator() {
        assert_eq!(parse_log_line("a1b2c3d\tsummary"), Some(CommitId::from("a1b2c3d")));
    }

    #[test]
    fn test_parse_log_line_blank_is_end() {
        assert_eq!(parse_log_line(""), None);
        assert_eq!(parse_log_line("   \n"), None);
    }
}
