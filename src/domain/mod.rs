//! Domain logic - pure release rules independent of the hosting platform

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{ClassifiedCommit, CommitType, PullRequestRef, RawCommit};
pub use tag::{classify_tag, ReleasePolicy, Tag, TagRules};
pub use version::{next_version, prerelease_increment, stable_increment, BumpLevel};
