//! Run report: what was selected, what was extracted, and how it is printed.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::git::{CommitId, Tag};
use crate::range::{Selection, SelectionMode};

use super::filter::{FilterOutcome, TicketFilter, apply_filter};

/// A tag seen during selection, with its decoded creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReport {
    pub name: Tag,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Tag> for TagReport {
    fn from(name: Tag) -> Self {
        let created_at = name.created_at();
        Self { name, created_at }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Tags from new to old.
    pub tags: Vec<TagReport>,
    /// Selected commits, newest first.
    pub commits: Vec<CommitId>,
    /// All ticket lines, deduplicated.
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub outcome: FilterOutcome,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

impl Report {
    pub fn new(
        mode: &SelectionMode,
        selection: Selection,
        lines: Vec<String>,
        filter: Option<&TicketFilter>,
    ) -> Self {
        let (outcome, partition) = apply_filter(filter, &lines);

        Self {
            mode: mode.as_str(),
            branch: None,
            tags: selection.tags.into_iter().map(TagReport::from).collect(),
            commits: selection.window.into_vec(),
            lines,
            filter: filter.map(|f| f.pattern().to_string()),
            outcome,
            matched: partition.matched,
            unmatched: partition.unmatched,
        }
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Print ticket lines to `out` and diagnostics to `diag`.
    ///
    /// With a filter only the matching lines are printed; a filter that matches
    /// nothing is reported on `diag` and prints no lines.
    pub fn write_text<W: Write, D: Write>(&self, out: &mut W, diag: &mut D) -> io::Result<()> {
        if let Some(branch) = &self.branch {
            writeln!(diag, "branch: {}", branch)?;
        }

        let commits: Vec<&str> = self.commits.iter().map(CommitId::as_str).collect();
        let tags: Vec<&str> = self.tags.iter().map(|t| t.name.name()).collect();
        writeln!(diag, "commits to pick: [{}]", commits.join(" "))?;
        writeln!(diag, "tags from new to old: [{}]", tags.join(" "))?;

        let pattern = self.filter.as_deref().unwrap_or_default();
        match self.outcome {
            FilterOutcome::NotFound => {
                writeln!(diag, "not found: no ticket lines match '{}'", pattern)?;
                return Ok(());
            }
            FilterOutcome::Found => {
                writeln!(
                    diag,
                    "found: {} of {} ticket lines match '{}'",
                    self.matched.len(),
                    self.lines.len(),
                    pattern
                )?;
            }
            FilterOutcome::Unfiltered => {}
        }

        for line in &self.matched {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
