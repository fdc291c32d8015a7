//! Tag-bounded commit range selection.
//!
//! The selector consumes the history walker lazily and decides, per commit,
//! whether to include it, skip it, or stop walking. Four selection modes are
//! supported; see [`SelectionMode`].

pub mod selector;
pub mod window;

use std::fmt;

use crate::error::{ConfigError, GitError};
use crate::git::{HistoryProvider, HistoryWalker, Tag};

pub use selector::{RangeSelector, Step};
pub use window::CommitWindow;

/// Depth budget for [`SelectionMode::StartPlusDepth`] when none is given.
pub const DEFAULT_DEPTH: usize = 10;

/// How the commit window is bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Commits from the newest tag down to (excluding) the commit of the next distinct tag.
    RecentTwoTags,
    /// Commits strictly between the commits carrying `start` and `end`.
    ///
    /// Whichever of the two tags is met first while walking opens the window.
    /// `budget` caps the number of distinct tagged commits inside the window.
    ExplicitRange {
        start: Tag,
        end: Tag,
        budget: Option<usize>,
    },
    /// Commits from the first tagged commit through the `count`-th distinct tagged commit.
    TagCount { count: usize },
    /// Commits from the commit carrying `start`, spanning at most `depth` distinct tagged commits.
    ///
    /// Chosen when `start` is given without `end`; with both, the range is explicit.
    StartPlusDepth { start: Tag, depth: usize },
}

impl SelectionMode {
    /// Choose the mode from the configured flags.
    ///
    /// `limit` is the tag-count flag with the unbounded sentinel already removed.
    pub fn from_flags(
        start: Option<Tag>,
        end: Option<Tag>,
        limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::ExplicitRange {
                start,
                end,
                budget: limit,
            }),
            (Some(start), None) => Ok(Self::StartPlusDepth {
                start,
                depth: limit.unwrap_or(DEFAULT_DEPTH),
            }),
            (None, Some(_)) => Err(ConfigError::EndWithoutStart),
            (None, None) => Ok(match limit {
                Some(count) => Self::TagCount { count },
                None => Self::RecentTwoTags,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecentTwoTags => "recent-two-tags",
            Self::ExplicitRange { .. } => "explicit-range",
            Self::TagCount { .. } => "tag-count",
            Self::StartPlusDepth { .. } => "start-plus-depth",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selected window plus the tags seen from its opening onward, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub window: CommitWindow,
    pub tags: Vec<Tag>,
}

/// Walk `provider`'s history and select the commit window for `mode`.
///
/// Walking stops as soon as the mode's stop condition is met.
pub fn select<P: HistoryProvider + ?Sized>(
    provider: &P,
    mode: &SelectionMode,
) -> Result<Selection, GitError> {
    let mut selector = RangeSelector::new(mode.clone());
    if selector.is_done() {
        return Ok(selector.finish());
    }

    for observation in HistoryWalker::start(provider)? {
        if selector.observe(observation) == Step::Stop {
            break;
        }
    }

    Ok(selector.finish())
}
