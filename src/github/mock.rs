use crate::domain::commit::{PullRequestRef, RawCommit};
use crate::domain::tag::Tag;
use crate::error::Result;
use crate::github::{NewRelease, ReleaseHost};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory host for testing the workflow without network access.
///
/// Mutations are recorded so tests can assert on what would have been
/// published.
#[derive(Default)]
pub struct MockHost {
    tags: Vec<Tag>,
    commits: Vec<RawCommit>,
    pulls: HashMap<String, Vec<PullRequestRef>>,
    upserted_refs: RefCell<Vec<(String, String)>>,
    deleted_releases: RefCell<Vec<String>>,
    created_releases: RefCell<Vec<NewRelease>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the repository.
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.push(Tag::new(name, commit_id));
    }

    /// Add a commit to the comparison range.
    pub fn add_commit(&mut self, id: impl Into<String>, message: impl Into<String>) {
        let id = id.into();
        let url = format!("https://example.com/commit/{}", id);
        self.commits.push(RawCommit::new(id, message, url));
    }

    /// Associate pull requests with a commit.
    pub fn add_pulls(&mut self, commit_id: impl Into<String>, pulls: Vec<PullRequestRef>) {
        self.pulls.insert(commit_id.into(), pulls);
    }

    /// Tag refs created or moved during the run.
    pub fn upserted_refs(&self) -> Vec<(String, String)> {
        self.upserted_refs.borrow().clone()
    }

    /// Tags whose releases were deleted during the run.
    pub fn deleted_releases(&self) -> Vec<String> {
        self.deleted_releases.borrow().clone()
    }

    /// Releases created during the run.
    pub fn created_releases(&self) -> Vec<NewRelease> {
        self.created_releases.borrow().clone()
    }
}

impl ReleaseHost for MockHost {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn compare_commits(&self, _base: &str, _head: &str) -> Result<Vec<RawCommit>> {
        Ok(self.commits.clone())
    }

    fn pull_requests_for_commit(&self, commit_id: &str) -> Result<Vec<PullRequestRef>> {
        Ok(self.pulls.get(commit_id).cloned().unwrap_or_default())
    }

    fn upsert_tag_ref(&self, tag: &str, commit_id: &str) -> Result<()> {
        self.upserted_refs
            .borrow_mut()
            .push((tag.to_string(), commit_id.to_string()));
        Ok(())
    }

    fn delete_release_for_tag(&self, tag: &str) -> Result<()> {
        self.deleted_releases.borrow_mut().push(tag.to_string());
        Ok(())
    }

    fn create_release(&self, release: &NewRelease) -> Result<()> {
        self.created_releases.borrow_mut().push(release.clone());
        Ok(())
    }
}
