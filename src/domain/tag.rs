use crate::error::{ReleasePublishError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which release lineage a run operates on.
///
/// Stable and pre-release tags form two disjoint pools so the lineages
/// never cross-pollute each other's version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleasePolicy {
    Stable,
    Prerelease,
}

impl FromStr for ReleasePolicy {
    type Err = ReleasePublishError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stable" => Ok(ReleasePolicy::Stable),
            "prerelease" => Ok(ReleasePolicy::Prerelease),
            other => Err(ReleasePublishError::config(format!(
                "Unknown release policy: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleasePolicy::Stable => write!(f, "stable"),
            ReleasePolicy::Prerelease => write!(f, "prerelease"),
        }
    }
}

/// Rules refining how tags are admitted into each lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRules {
    /// Pre-release identifier component that marks a tag as belonging to
    /// the pre-release lineage. Empty means any pre-release identifier
    /// qualifies.
    pub marker: String,
    /// Whether the stable pool accepts tags carrying pre-release suffixes
    /// unrelated to the marker.
    pub stable_accepts_suffixed: bool,
}

impl Default for TagRules {
    fn default() -> Self {
        TagRules {
            marker: "pre".to_string(),
            stable_accepts_suffixed: true,
        }
    }
}

/// A tag as reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_id: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }
}

/// Parse a tag name into a comparable version, admitting it under the
/// given policy.
///
/// Returns `None` when the name is not valid semver, or when it parses
/// but belongs to the other lineage. A leading 'v' or 'V' prefix is
/// tolerated.
pub fn classify_tag(name: &str, policy: ReleasePolicy, rules: &TagRules) -> Option<Version> {
    let clean = name.trim_start_matches('v').trim_start_matches('V');
    let version = Version::parse(clean).ok()?;

    let marked = if rules.marker.is_empty() {
        !version.pre.is_empty()
    } else {
        version.pre.as_str().split('.').any(|part| part == rules.marker)
    };

    match policy {
        ReleasePolicy::Prerelease => {
            if marked {
                Some(version)
            } else {
                None
            }
        }
        ReleasePolicy::Stable => {
            if marked {
                return None;
            }
            if !version.pre.is_empty() && !rules.stable_accepts_suffixed {
                return None;
            }
            Some(version)
        }
    }
}
