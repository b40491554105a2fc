//! Version increment rules
//!
//! Applies a bump decision to the previous release version. Stable
//! releases follow plain semver increment semantics; pre-releases bump
//! the stable base and carry a channel-named counter (e.g. "beta.0").

use crate::domain::tag::ReleasePolicy;
use crate::error::{ReleasePublishError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Which version component a set of commits warrants incrementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::Major => write!(f, "major"),
            BumpLevel::Minor => write!(f, "minor"),
            BumpLevel::Patch => write!(f, "patch"),
        }
    }
}

/// Compute the next version from the previous release.
///
/// Under the stable policy the increment applies directly and any
/// pre-release identifiers are stripped. Under the pre-release policy
/// the corresponding pre-increment (premajor/preminor/prepatch) seeds
/// or advances the channel counter.
pub fn next_version(
    previous: &Version,
    level: BumpLevel,
    policy: ReleasePolicy,
    channel: &str,
) -> Result<Version> {
    match policy {
        ReleasePolicy::Stable => Ok(stable_increment(previous, level)),
        ReleasePolicy::Prerelease => prerelease_increment(previous, level, channel),
    }
}

/// Apply a stable increment, resetting lower components to zero.
///
/// A pre-release that already sits on the target component completes to
/// its base instead of skipping it: 1.3.0-beta.0 + minor = 1.3.0.
pub fn stable_increment(previous: &Version, level: BumpLevel) -> Version {
    let pre = !previous.pre.is_empty();
    let (major, minor, patch) = match level {
        BumpLevel::Major if pre && previous.minor == 0 && previous.patch == 0 => {
            (previous.major, 0, 0)
        }
        BumpLevel::Major => (previous.major + 1, 0, 0),
        BumpLevel::Minor if pre && previous.patch == 0 => (previous.major, previous.minor, 0),
        BumpLevel::Minor => (previous.major, previous.minor + 1, 0),
        BumpLevel::Patch if pre => (previous.major, previous.minor, previous.patch),
        BumpLevel::Patch => (previous.major, previous.minor, previous.patch + 1),
    };

    Version {
        major,
        minor,
        patch,
        pre: Prerelease::EMPTY,
        build: BuildMetadata::EMPTY,
    }
}

/// Apply a pre-release increment on the given channel.
///
/// The first pre-release against a new stable base starts the counter at
/// 0; successive pre-releases against the same base increment it.
pub fn prerelease_increment(previous: &Version, level: BumpLevel, channel: &str) -> Result<Version> {
    let base = stable_increment(previous, level);

    let counter = if same_core(previous, &base) {
        match channel_counter(&previous.pre, channel) {
            Some(n) => n + 1,
            None => 0,
        }
    } else {
        0
    };

    let mut next = base;
    next.pre = Prerelease::new(&format!("{}.{}", channel, counter)).map_err(|e| {
        ReleasePublishError::version(format!(
            "Invalid pre-release channel '{}': {}",
            channel, e
        ))
    })?;
    Ok(next)
}

fn same_core(a: &Version, b: &Version) -> bool {
    (a.major, a.minor, a.patch) == (b.major, b.minor, b.patch)
}

/// Extract the numeric counter from a "channel.N" identifier sequence.
fn channel_counter(pre: &Prerelease, channel: &str) -> Option<u64> {
    let rest = pre.as_str().strip_prefix(channel)?;
    let rest = rest.strip_prefix('.')?;
    rest.parse().ok()
}
