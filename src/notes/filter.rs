//! User `--find` filter over extracted ticket lines.

use regex_lite::Regex;
use serde::Serialize;

use crate::error::ExtractError;

/// Whether a filter ran and whether it matched anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOutcome {
    Unfiltered,
    Found,
    NotFound,
}

/// Ticket lines split by the filter, both halves in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

/// Compiled `--find` pattern.
#[derive(Debug, Clone)]
pub struct TicketFilter {
    pattern: String,
    regex: Regex,
}

impl TicketFilter {
    pub fn new(pattern: &str) -> Result<Self, ExtractError> {
        let regex = Regex::new(pattern).map_err(|source| ExtractError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Compile an optional pattern; absent or empty means no filter.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Option<Self>, ExtractError> {
        match pattern {
            Some(p) if !p.is_empty() => Self::new(p).map(Some),
            _ => Ok(None),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    pub fn partition(&self, lines: &[String]) -> Partition {
        let (matched, unmatched): (Vec<String>, Vec<String>) =
            lines.iter().cloned().partition(|line| self.is_match(line));
        Partition { matched, unmatched }
    }
}

/// Apply an optional filter to the ticket lines.
///
/// Without a filter every line counts as matched and the outcome is `Unfiltered`.
pub fn apply_filter(filter: Option<&TicketFilter>, lines: &[String]) -> (FilterOutcome, Partition) {
    let Some(filter) = filter else {
        let partition = Partition {
            matched: lines.to_vec(),
            unmatched: Vec::new(),
        };
        return (FilterOutcome::Unfiltered, partition);
    };

    let partition = filter.partition(lines);
    let outcome = if partition.matched.is_empty() {
        FilterOutcome::NotFound
    } else {
        FilterOutcome::Found
    };
    (outcome, partition)
}
