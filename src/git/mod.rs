//! Git history access: the provider capability, the lazy history walker, and tag handling.

pub mod commits;
pub mod provider;
pub mod repo;
pub mod tags;
pub mod walker;

pub use commits::CommitId;
pub use provider::{GitCli, HistoryProvider};
pub use tags::{Tag, effective_tag};
pub use walker::{HistoryWalker, Observation};
