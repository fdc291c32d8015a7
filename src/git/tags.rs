//! Tag names, their timestamp suffixes, and tie-breaking between co-located tags.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Suffixes below this are not treated as Unix timestamps when reporting creation time.
const MIN_PLAUSIBLE_EPOCH: i64 = 1_000_000_000;

/// A git tag name.
///
/// Deployment tags carry their creation time as a trailing numeric suffix after
/// the final `-` (e.g. `release-20240102-1700000000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The ordering key among tags on the same commit.
    ///
    /// Returns 0 when the suffix is not an integer, so such tags lose every tie-break.
    pub fn timestamp(&self) -> i64 {
        self.0
            .rsplit('-')
            .next()
            .and_then(|suffix| suffix.parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Creation time decoded from the suffix, if it looks like a Unix timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.timestamp();
        if secs < MIN_PLAUSIBLE_EPOCH {
            return None;
        }
        DateTime::from_timestamp(secs, 0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Parse `git tag --points-at` output: one tag per line, blank lines ignored.
pub fn parse_tag_list(output: &str) -> Vec<Tag> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Tag::from)
        .collect()
}

/// Pick the tag that represents a commit carrying several tags.
///
/// The tag with the highest timestamp suffix wins. Equal timestamps keep the
/// first one in input order.
pub fn effective_tag(tags: &[Tag]) -> Option<&Tag> {
    tags.iter()
        .reduce(|best, tag| if tag.timestamp() > best.timestamp() { tag } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|n| Tag::from(*n)).collect()
    }

    #[test]
    fn test_timestamp_from_suffix() {
        assert_eq!(Tag::from("release-20240102-1700000000").timestamp(), 1_700_000_000);
        assert_eq!(Tag::from("v-100").timestamp(), 100);
    }

    #[test]
    fn test_timestamp_unparseable_is_zero() {
        assert_eq!(Tag::from("release-candidate").timestamp(), 0);
        assert_eq!(Tag::from("v1.2.3").timestamp(), 0);
        assert_eq!(Tag::from("release-").timestamp(), 0);
    }

    #[test]
    fn test_timestamp_without_separator() {
        assert_eq!(Tag::from("1700000000").timestamp(), 1_700_000_000);
        assert_eq!(Tag::from("latest").timestamp(), 0);
    }

    #[test]
    fn test_effective_tag_highest_suffix_wins() {
        let forward = tags(&["v-100", "v-200"]);
        let reverse = tags(&["v-200", "v-100"]);

        assert_eq!(effective_tag(&forward).map(Tag::name), Some("v-200"));
        assert_eq!(effective_tag(&reverse).map(Tag::name), Some("v-200"));
    }

    #[test]
    fn test_effective_tag_malformed_loses() {
        let list = tags(&["nightly", "deploy-5"]);
        assert_eq!(effective_tag(&list).map(Tag::name), Some("deploy-5"));
    }

    #[test]
    fn test_effective_tag_ties_keep_input_order() {
        let list = tags(&["alpha", "beta"]);
        assert_eq!(effective_tag(&list).map(Tag::name), Some("alpha"));
    }

    #[test]
    fn test_effective_tag_empty() {
        assert!(effective_tag(&[]).is_none());
    }

    #[test]
    fn test_parse_tag_list_skips_blank_lines() {
        let list = parse_tag_list("deploy-1\n\n  deploy-2  \n");
        assert_eq!(list, tags(&["deploy-1", "deploy-2"]));
    }

    #[test]
    fn test_created_at_for_epoch_suffix() {
        let created = Tag::from("release-1700000000").created_at().expect("expected a timestamp");
        assert_eq!(created.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_created_at_ignores_small_suffix() {
        assert!(Tag::from("v-200").created_at().is_none());
        assert!(Tag::from("release-20240102").created_at().is_none());
    }
}
