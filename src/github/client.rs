use crate::domain::commit::{PullRequestRef, RawCommit};
use crate::domain::tag::Tag;
use crate::error::{ReleasePublishError, Result};
use crate::github::{NewRelease, ReleaseHost};
use serde::Deserialize;
use serde_json::json;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// GitHub REST implementation of [ReleaseHost].
pub struct GithubClient {
    agent: ureq::Agent,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

#[derive(Deserialize)]
struct TagPayload {
    name: String,
    commit: CommitRefPayload,
}

#[derive(Deserialize)]
struct CommitRefPayload {
    sha: String,
}

#[derive(Deserialize)]
struct ComparePayload {
    commits: Vec<CommitPayload>,
}

#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
    html_url: String,
    commit: CommitDetailPayload,
}

#[derive(Deserialize)]
struct CommitDetailPayload {
    message: String,
}

#[derive(Deserialize)]
struct PullPayload {
    number: u64,
    html_url: String,
}

#[derive(Deserialize)]
struct ReleasePayload {
    id: u64,
}

impl GithubClient {
    /// Create a client for an `owner/name` repository slug.
    pub fn new(repo_slug: &str, token: impl Into<String>) -> Result<Self> {
        let (owner, repo) = repo_slug.split_once('/').ok_or_else(|| {
            ReleasePublishError::config(format!(
                "Repository must be in owner/name form, got '{}'",
                repo_slug
            ))
        })?;

        Ok(GithubClient {
            agent: ureq::Agent::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.into(),
        })
    }

    /// Point the client at a different API base URL. Used for GitHub
    /// Enterprise installations and for tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "release-publish");

        // An empty token means anonymous access, which is enough for
        // read-only previews against public repositories.
        if self.token.is_empty() {
            request
        } else {
            request.set("Authorization", &format!("Bearer {}", self.token))
        }
    }
}

impl ReleaseHost for GithubClient {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut page = 1;

        loop {
            let payload: Vec<TagPayload> = self
                .request("GET", &self.url("tags"))
                .query("per_page", &PAGE_SIZE.to_string())
                .query("page", &page.to_string())
                .call()?
                .into_json()?;

            let fetched = payload.len();
            tags.extend(
                payload
                    .into_iter()
                    .map(|tag| Tag::new(tag.name, tag.commit.sha)),
            );

            if fetched < PAGE_SIZE {
                return Ok(tags);
            }
            page += 1;
        }
    }

    fn compare_commits(&self, base: &str, head: &str) -> Result<Vec<RawCommit>> {
        let payload: ComparePayload = self
            .request(
                "GET",
                &self.url(&format!("compare/{}...{}", base, head)),
            )
            .call()?
            .into_json()?;

        Ok(payload
            .commits
            .into_iter()
            .map(|commit| RawCommit::new(commit.sha, commit.commit.message, commit.html_url))
            .collect())
    }

    fn pull_requests_for_commit(&self, commit_id: &str) -> Result<Vec<PullRequestRef>> {
        let payload: Vec<PullPayload> = self
            .request("GET", &self.url(&format!("commits/{}/pulls", commit_id)))
            .call()?
            .into_json()?;

        Ok(payload
            .into_iter()
            .map(|pull| PullRequestRef {
                number: pull.number,
                url: pull.html_url,
            })
            .collect())
    }

    fn upsert_tag_ref(&self, tag: &str, commit_id: &str) -> Result<()> {
        let created = self.request("POST", &self.url("git/refs")).send_json(json!({
            "ref": format!("refs/tags/{}", tag),
            "sha": commit_id,
        }));

        if created.is_err() {
            // The ref already exists (or raced into existence): move it.
            // A raw transport error here would hide the swallowed create
            // failure, so report the operation that actually failed.
            self.request("PATCH", &self.url(&format!("git/refs/tags/{}", tag)))
                .send_json(json!({
                    "sha": commit_id,
                    "force": true,
                }))
                .map_err(|e| {
                    ReleasePublishError::host(format!(
                        "Cannot create or update tag ref '{}': {}",
                        tag, e
                    ))
                })?;
        }

        Ok(())
    }

    fn delete_release_for_tag(&self, tag: &str) -> Result<()> {
        let found = self
            .request("GET", &self.url(&format!("releases/tags/{}", tag)))
            .call();

        match found {
            Ok(response) => {
                let release: ReleasePayload = response.into_json()?;
                self.request("DELETE", &self.url(&format!("releases/{}", release.id)))
                    .call()
                    .map_err(|e| {
                        ReleasePublishError::host(format!(
                            "Cannot delete release {} for tag '{}': {}",
                            release.id, tag, e
                        ))
                    })?;
                Ok(())
            }
            Err(ureq::Error::Status(404, _)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn create_release(&self, release: &NewRelease) -> Result<()> {
        self.request("POST", &self.url("releases"))
            .send_json(json!({
                "tag_name": release.tag,
                "name": release.title,
                "body": release.body,
                "prerelease": release.prerelease,
            }))?;

        Ok(())
    }
}
