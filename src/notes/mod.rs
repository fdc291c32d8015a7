//! Release-note fragments: ticket lines from the selected commit window.

pub mod extract;
pub mod filter;
pub mod report;

use tracing::info;

use crate::config::Config;
use crate::error::GitError;
use crate::git::HistoryProvider;
use crate::range::select;

pub use extract::{extract_ticket_lines, is_ticket_line};
pub use filter::{FilterOutcome, TicketFilter};
pub use report::Report;

/// Select the commit window for the configured mode and extract its ticket lines.
pub fn generate_notes<P: HistoryProvider + ?Sized>(
    provider: &P,
    config: &Config,
) -> Result<Report, GitError> {
    let selection = select(provider, &config.mode)?;

    info!(
        mode = %config.mode,
        commits = selection.window.len(),
        tags = selection.tags.len(),
        "Selected commit window"
    );

    let lines = extract_ticket_lines(provider, selection.window.iter());

    Ok(Report::new(
        &config.mode,
        selection,
        lines,
        config.filter.as_ref(),
    ))
}
