//! Ticket-reference line extraction from commit messages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::git::{CommitId, HistoryProvider};

/// `#<digits>` or `U-<digits>` opening the line, or as a whole word after
/// whitespace or `(`.
static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#|U-)\d+|[\s(](?:#|U-)\d+\b").unwrap());

/// Whether a trimmed message line carries a ticket reference.
pub fn is_ticket_line(line: &str) -> bool {
    TICKET_RE.is_match(line)
}

/// Trimmed lines of `message` that carry a ticket reference, in message order.
pub fn ticket_lines(message: &str) -> impl Iterator<Item = &str> {
    message
        .lines()
        .map(str::trim)
        .filter(|line| is_ticket_line(line))
}

/// Ticket lines collected across commits, deduplicated by exact text.
#[derive(Debug, Default)]
pub struct TicketLines {
    lines: Vec<String>,
    seen: HashSet<String>,
}

impl TicketLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the ticket lines of one commit message, skipping lines already collected.
    pub fn add_message(&mut self, message: &str) {
        for line in ticket_lines(message) {
            if self.seen.insert(line.to_string()) {
                self.lines.push(line.to_string());
            }
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.lines
    }
}

/// Fetch each commit's message and collect its ticket lines, first-seen order.
///
/// A message that cannot be fetched contributes nothing.
pub fn extract_ticket_lines<'a, P, I>(provider: &P, commits: I) -> Vec<String>
where
    P: HistoryProvider + ?Sized,
    I: IntoIterator<Item = &'a CommitId>,
{
    let mut collected = TicketLines::new();

    for commit in commits {
        match provider.message_of(commit) {
            Ok(message) => collected.add_message(&message),
            Err(e) => {
                debug!(commit = %commit, error = %e, "Could not read commit message, skipping");
            }
        }
    }

    collected.into_vec()
}
