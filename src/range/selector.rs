//! Per-commit inclusion and stopping policy for each selection mode.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::git::{CommitId, Observation, Tag, effective_tag};

use super::window::CommitWindow;
use super::{Selection, SelectionMode};

/// What the walker should do after a commit has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

/// Window and tag list built up during one run.
#[derive(Debug, Default)]
struct Accumulator {
    window: CommitWindow,
    tags: Vec<Tag>,
    seen: HashSet<Tag>,
}

impl Accumulator {
    /// Record `tag` in the tag list; returns false if it was already recorded.
    fn record(&mut self, tag: &Tag) -> bool {
        if !self.seen.insert(tag.clone()) {
            return false;
        }
        self.tags.push(tag.clone());
        true
    }

    fn is_new(&self, tag: &Tag) -> bool {
        !self.seen.contains(tag)
    }

    fn is_open(&self) -> bool {
        !self.tags.is_empty()
    }

    fn include(&mut self, commit: CommitId) {
        self.window.push(commit);
    }
}

/// Mode-specific walking state.
#[derive(Debug)]
enum Policy {
    RecentTwoTags,
    ExplicitRange {
        start: Tag,
        end: Tag,
        /// Set once the first boundary is met: the tag that closes the window.
        closing: Option<Tag>,
        remaining: Option<usize>,
    },
    TagCount {
        remaining: usize,
    },
    StartPlusDepth {
        start: Tag,
        opened: bool,
        remaining: usize,
    },
}

impl Policy {
    fn new(mode: &SelectionMode) -> Self {
        match mode {
            SelectionMode::RecentTwoTags => Self::RecentTwoTags,
            SelectionMode::ExplicitRange { start, end, budget } => Self::ExplicitRange {
                start: start.clone(),
                end: end.clone(),
                closing: None,
                remaining: *budget,
            },
            SelectionMode::TagCount { count } => Self::TagCount { remaining: *count },
            SelectionMode::StartPlusDepth { start, depth } => Self::StartPlusDepth {
                start: start.clone(),
                opened: false,
                remaining: *depth,
            },
        }
    }

    fn observe(&mut self, acc: &mut Accumulator, observation: Observation) -> Step {
        let Observation { commit, tags } = observation;

        match self {
            Self::RecentTwoTags => {
                match effective_tag(&tags) {
                    Some(tag) => {
                        if acc.record(tag) && acc.tags.len() == 2 {
                            debug!(commit = %commit, tag = %tag, "Second tag reached, excluding its commit");
                            return Step::Stop;
                        }
                        acc.include(commit);
                    }
                    None if acc.is_open() => acc.include(commit),
                    None => {}
                }
                Step::Continue
            }

            Self::ExplicitRange {
                start,
                end,
                closing,
                remaining,
            } => {
                let Some(closing_tag) = closing.as_ref() else {
                    let has_start = tags.contains(start);
                    let has_end = tags.contains(end);
                    let (opening, other) = match (has_start, has_end) {
                        (true, true) => {
                            acc.record(start);
                            acc.record(end);
                            debug!(commit = %commit, "Both range tags on one commit, window is empty");
                            return Step::Stop;
                        }
                        (true, false) => (start.clone(), end.clone()),
                        (false, true) => (end.clone(), start.clone()),
                        (false, false) => return Step::Continue,
                    };
                    debug!(commit = %commit, tag = %opening, "Range opened, excluding its commit");
                    acc.record(&opening);
                    *closing = Some(other);
                    return Step::Continue;
                };

                if tags.contains(closing_tag) {
                    debug!(commit = %commit, tag = %closing_tag, "Range closed, excluding its commit");
                    acc.record(closing_tag);
                    return Step::Stop;
                }

                if let Some(tag) = effective_tag(&tags) {
                    if spend_budget(acc, remaining.as_mut(), tag) == Step::Stop {
                        debug!(commit = %commit, tag = %tag, "Tag budget spent, excluding its commit");
                        return Step::Stop;
                    }
                }
                acc.include(commit);
                Step::Continue
            }

            Self::TagCount { remaining } => {
                match effective_tag(&tags) {
                    Some(tag) => {
                        acc.include(commit);
                        if acc.record(tag) {
                            *remaining = remaining.saturating_sub(1);
                            if *remaining == 0 {
                                return Step::Stop;
                            }
                        }
                    }
                    None if acc.is_open() => acc.include(commit),
                    None => {}
                }
                Step::Continue
            }

            Self::StartPlusDepth {
                start,
                opened,
                remaining,
            } => {
                if !*opened {
                    if !tags.contains(start) {
                        return Step::Continue;
                    }
                    *opened = true;
                    acc.record(start);
                    if *remaining == 0 {
                        debug!(commit = %commit, "Depth is zero, window is empty");
                        return Step::Stop;
                    }
                    *remaining -= 1;
                    acc.include(commit);
                    return Step::Continue;
                }

                if let Some(tag) = effective_tag(&tags) {
                    if spend_budget(acc, Some(remaining), tag) == Step::Stop {
                        debug!(commit = %commit, tag = %tag, "Depth spent, excluding its commit");
                        return Step::Stop;
                    }
                }
                acc.include(commit);
                Step::Continue
            }
        }
    }

    /// Warn about boundaries that never appeared before the history ran out.
    fn report_unterminated(&self) {
        match self {
            Self::ExplicitRange {
                start,
                end,
                closing: None,
                ..
            } => warn!("Neither {} nor {} was found in history; nothing selected", start, end),
            Self::ExplicitRange {
                closing: Some(closing),
                ..
            } => warn!("Tag {} was not found; window runs to the end of history", closing),
            Self::StartPlusDepth {
                start,
                opened: false,
                ..
            } => warn!("Start tag {} was not found in history; nothing selected", start),
            Self::RecentTwoTags | Self::TagCount { .. } | Self::StartPlusDepth { .. } => {
                debug!("History ended before the stop condition was met");
            }
        }
    }
}

/// Charge one unit of budget for a newly seen tagged commit.
///
/// Returns `Step::Stop` (with the tag recorded as the boundary) when the budget
/// was already spent. Re-observed tags are free.
fn spend_budget(acc: &mut Accumulator, remaining: Option<&mut usize>, tag: &Tag) -> Step {
    if !acc.is_new(tag) {
        return Step::Continue;
    }
    acc.record(tag);

    match remaining {
        Some(0) => Step::Stop,
        Some(left) => {
            *left -= 1;
            Step::Continue
        }
        None => Step::Continue,
    }
}

/// Applies one [`SelectionMode`] to observations fed newest-first.
#[derive(Debug)]
pub struct RangeSelector {
    mode: SelectionMode,
    policy: Policy,
    acc: Accumulator,
    done: bool,
}

impl RangeSelector {
    pub fn new(mode: SelectionMode) -> Self {
        let done = matches!(mode, SelectionMode::TagCount { count: 0 });
        Self {
            policy: Policy::new(&mode),
            mode,
            acc: Accumulator::default(),
            done,
        }
    }

    /// True once the stop condition has been met; further observations are ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn observe(&mut self, observation: Observation) -> Step {
        if self.done {
            return Step::Stop;
        }

        let step = self.policy.observe(&mut self.acc, observation);
        if step == Step::Stop {
            self.done = true;
        }
        step
    }

    pub fn finish(self) -> Selection {
        if !self.done {
            self.policy.report_unterminated();
        }

        debug!(
            mode = %self.mode,
            commits = self.acc.window.len(),
            tags = self.acc.tags.len(),
            "Selection finished"
        );

        Selection {
            window: self.acc.window,
            tags: self.acc.tags,
        }
    }
}
