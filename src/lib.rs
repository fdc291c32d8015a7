//! tagnotes - A CLI tool that extracts ticket references between deployment tags.
//!
//! # Overview
//!
//! tagnotes walks a repository's history newest-first, finds the commits that
//! carry deployment tags, selects the commit window between them, and prints
//! the ticket-reference lines (`#1234`, `U-1234`) from those commits' messages
//! as a release-note fragment.

pub mod config;
pub mod error;
pub mod git;
pub mod notes;
pub mod range;

// Re-export commonly used types
pub use config::{Config, RunOptions};
pub use error::{ConfigError, ExtractError, GitError};
pub use git::{CommitId, GitCli, HistoryProvider, Tag};
pub use notes::{FilterOutcome, Report, TicketFilter, generate_notes};
pub use range::{CommitWindow, Selection, SelectionMode, select};
