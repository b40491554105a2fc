//! Hosting platform abstraction layer
//!
//! The release workflow talks to the hosting platform through the
//! [ReleaseHost] trait so the engine can run against the live GitHub
//! REST API ([GithubClient]) or an in-memory double ([MockHost]) in
//! tests.

pub mod client;
pub mod mock;

pub use client::GithubClient;
pub use mock::MockHost;

use crate::domain::commit::{PullRequestRef, RawCommit};
use crate::domain::tag::Tag;
use crate::error::Result;

/// A release to be published for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub tag: String,
    pub title: String,
    pub body: String,
    pub prerelease: bool,
}

/// Host-side operations needed by the release workflow.
///
/// All list results are fully materialized; the workflow never streams.
pub trait ReleaseHost {
    /// All tags of the repository.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Commits in the `base...head` range, in the platform's native
    /// comparison order.
    fn compare_commits(&self, base: &str, head: &str) -> Result<Vec<RawCommit>>;

    /// Pull requests associated with a commit.
    fn pull_requests_for_commit(&self, commit_id: &str) -> Result<Vec<PullRequestRef>>;

    /// Create the tag ref, force-updating it when it already exists.
    fn upsert_tag_ref(&self, tag: &str, commit_id: &str) -> Result<()>;

    /// Delete the release attached to a tag, if one exists. A missing
    /// release is not an error.
    fn delete_release_for_tag(&self, tag: &str) -> Result<()>;

    /// Create a release record.
    fn create_release(&self, release: &NewRelease) -> Result<()>;
}
