//! Release workflow orchestration
//!
//! Drives the end-to-end sequence: resolve the previous release tag,
//! fetch the commit range, classify, compute the bump, derive the next
//! version, render the changelog, then publish the tag ref and release
//! record. All host access goes through [crate::github::ReleaseHost] and
//! all progress through [crate::report::Reporter].

use crate::analyzer::{classify_commits, compute_bump, resolve_previous_tag};
use crate::changelog::render_changelog;
use crate::config::Config;
use crate::domain::tag::{classify_tag, ReleasePolicy};
use crate::domain::version::next_version;
use crate::error::{ReleasePublishError, Result};
use crate::github::{NewRelease, ReleaseHost};
use crate::report::Reporter;
use semver::Version;

/// Arguments for one release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowArgs {
    /// Environment selector, mapped to a policy through the config
    pub environment: String,
    /// Commit id being released (head of the comparison range)
    pub head: String,
    /// Reuse a fixed tag instead of the computed version, replacing any
    /// release previously attached to it
    pub fixed_tag: Option<String>,
    /// Release title; defaults to the tag name
    pub title: Option<String>,
    /// Stop before any host mutation
    pub dry_run: bool,
}

/// Outcome of a release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    pub previous_tag: Option<String>,
    pub tag: String,
    pub changelog: String,
    pub published: bool,
}

/// Run the release workflow against a host.
pub fn run_release_workflow(
    args: &WorkflowArgs,
    config: &Config,
    host: &dyn ReleaseHost,
    reporter: &dyn Reporter,
) -> Result<WorkflowResult> {
    let policy = config.policy_for(&args.environment)?;
    let rules = config.tag_rules();
    reporter.debug(&format!(
        "Environment '{}' maps to {} policy",
        args.environment, policy
    ));

    reporter.group("Resolving previous release");
    let tags = host.list_tags()?;
    reporter.debug(&format!("Found {} tags", tags.len()));
    let previous = resolve_previous_tag(&tags, policy, &rules);

    let previous_version = match &previous {
        Some(tag) => {
            reporter.info(&format!("Previous release tag: {}", tag.name));
            // The resolver only returns tags the classifier admitted.
            let version = classify_tag(&tag.name, policy, &rules).ok_or_else(|| {
                ReleasePublishError::tag(format!("Tag '{}' is not a valid release tag", tag.name))
            })?;
            Some(version)
        }
        None => {
            reporter.info("No previous release found, using full history");
            None
        }
    };

    reporter.group("Fetching commit history");
    let base = previous.as_ref().map(|tag| tag.name.clone());
    let mut raw_commits = host.compare_commits(base.as_deref().unwrap_or("HEAD"), &args.head)?;
    reporter.info(&format!(
        "Found {} commits since last release",
        raw_commits.len()
    ));

    for commit in &mut raw_commits {
        match host.pull_requests_for_commit(&commit.id) {
            Ok(pulls) => commit.pull_requests = pulls,
            Err(e) => reporter.debug(&format!(
                "No pull request data for {}: {}",
                commit.id, e
            )),
        }
    }

    reporter.group("Classifying commits");
    let classified = classify_commits(&raw_commits, reporter);
    reporter.debug(&format!(
        "{} of {} commits classified",
        classified.len(),
        raw_commits.len()
    ));

    let bump = compute_bump(&classified);
    reporter.info(&format!("Recommended bump: {}", bump));

    let next = match &previous_version {
        Some(version) => next_version(version, bump, policy, &config.prerelease.channel)?,
        None => seed_version(config)?,
    };
    reporter.info(&format!("Next version: {}", next));

    let tag_name = args
        .fixed_tag
        .clone()
        .unwrap_or_else(|| next.to_string());

    reporter.group("Rendering changelog");
    let changelog = render_changelog(&classified);

    if args.dry_run {
        reporter.info(&format!("Dry run: would publish tag {}", tag_name));
        return Ok(WorkflowResult {
            previous_tag: base,
            tag: tag_name,
            changelog,
            published: false,
        });
    }

    reporter.group(&format!("Publishing release {}", tag_name));
    host.upsert_tag_ref(&tag_name, &args.head)?;
    if args.fixed_tag.is_some() {
        // A reused tag keeps exactly one release attached to it.
        host.delete_release_for_tag(&tag_name)?;
    }

    let title = args.title.clone().unwrap_or_else(|| tag_name.clone());
    host.create_release(&NewRelease {
        tag: tag_name.clone(),
        title,
        body: changelog.clone(),
        prerelease: policy == ReleasePolicy::Prerelease,
    })?;
    reporter.info(&format!("Published release {}", tag_name));

    Ok(WorkflowResult {
        previous_tag: base,
        tag: tag_name,
        changelog,
        published: true,
    })
}

/// Initial version for a first release, taken from configuration.
fn seed_version(config: &Config) -> Result<Version> {
    let seed = config.release.initial_version.as_deref().ok_or_else(|| {
        ReleasePublishError::version(
            "No previous release tag exists and no initial version is configured",
        )
    })?;

    Version::parse(seed.trim_start_matches('v').trim_start_matches('V')).map_err(|e| {
        ReleasePublishError::version(format!("Invalid initial version '{}': {}", seed, e))
    })
}
