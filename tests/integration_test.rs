// tests/integration_test.rs
use release_publish::config::Config;
use release_publish::github::MockHost;
use release_publish::report::NullReporter;
use release_publish::workflow::{run_release_workflow, WorkflowArgs};

fn args(environment: &str) -> WorkflowArgs {
    WorkflowArgs {
        environment: environment.to_string(),
        head: "feedface0000000000000000000000000000cafe".to_string(),
        fixed_tag: None,
        title: None,
        dry_run: false,
    }
}

#[test]
fn test_stable_release_end_to_end() {
    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");
    host.add_tag("1.2.0", "bbb");
    host.add_tag("1.1.0", "ccc");
    host.add_commit("d1d1d1d1d1d1d1d1", "feat(api): add endpoint");
    host.add_commit("d2d2d2d2d2d2d2d2", "fix: handle nulls");

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();

    assert_eq!(result.previous_tag.as_deref(), Some("1.2.0"));
    assert_eq!(result.tag, "1.3.0");
    assert!(result.published);
    assert!(result.changelog.contains("## Features"));
    assert!(result.changelog.contains("## Bug Fixes"));

    // Tag ref points at the released head
    let refs = host.upserted_refs();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].0, "1.3.0");
    assert_eq!(refs[0].1, "feedface0000000000000000000000000000cafe");

    // Release carries the changelog
    let releases = host.created_releases();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag, "1.3.0");
    assert_eq!(releases[0].title, "1.3.0");
    assert_eq!(releases[0].body, result.changelog);
    assert!(!releases[0].prerelease);

    // No fixed tag, so no prior release was deleted
    assert!(host.deleted_releases().is_empty());
}

#[test]
fn test_breaking_change_releases_major() {
    let mut host = MockHost::new();
    host.add_tag("2.3.4", "aaa");
    host.add_commit("e1e1e1e1e1e1e1e1", "docs: tweak readme");
    host.add_commit(
        "e2e2e2e2e2e2e2e2",
        "fix: rename field\n\nBREAKING CHANGE: field changed from X to Y",
    );

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();
    assert_eq!(result.tag, "3.0.0");
}

#[test]
fn test_prerelease_lineage_in_test_environment() {
    let mut host = MockHost::new();
    host.add_tag("1.2.3", "aaa");
    host.add_tag("1.3.0-pre.0", "bbb");
    host.add_commit("f1f1f1f1f1f1f1f1", "feat: more work");

    let result =
        run_release_workflow(&args("test"), &Config::default(), &host, &NullReporter).unwrap();

    // The pre-release pool resolves 1.3.0-pre.0 as the previous release;
    // the next pre-release on the same base joins the beta channel.
    assert_eq!(result.previous_tag.as_deref(), Some("1.3.0-pre.0"));
    assert_eq!(result.tag, "1.3.0-beta.0");

    let releases = host.created_releases();
    assert!(releases[0].prerelease);
}

#[test]
fn test_prerelease_counter_advances_with_matching_marker() {
    // With the marker relaxed, beta tags form the pre-release lineage
    // and the counter advances across successive runs.
    let config: Config = toml::from_str(
        r#"
        [prerelease]
        marker = ""
        "#,
    )
    .unwrap();

    let mut host = MockHost::new();
    host.add_tag("1.2.3", "aaa");
    host.add_tag("1.3.0-beta.0", "bbb");
    host.add_commit("a1a1a1a1a1a1a1a1", "feat: follow-up");

    let result = run_release_workflow(&args("test"), &config, &host, &NullReporter).unwrap();
    assert_eq!(result.previous_tag.as_deref(), Some("1.3.0-beta.0"));
    assert_eq!(result.tag, "1.3.0-beta.1");
}

#[test]
fn test_first_release_uses_configured_seed() {
    let mut host = MockHost::new();
    host.add_tag("nightly", "aaa");
    host.add_commit("b1b1b1b1b1b1b1b1", "feat: everything");

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();

    assert_eq!(result.previous_tag, None);
    assert_eq!(result.tag, "0.1.0");
}

#[test]
fn test_first_release_without_seed_is_fatal() {
    let mut config = Config::default();
    config.release.initial_version = None;

    let host = MockHost::new();
    let err = run_release_workflow(&args("prod"), &config, &host, &NullReporter).unwrap_err();
    assert!(err.to_string().contains("initial version"));

    // Precondition failures must not mutate the host
    assert!(host.upserted_refs().is_empty());
    assert!(host.created_releases().is_empty());
}

#[test]
fn test_unknown_environment_is_fatal() {
    let host = MockHost::new();
    let err =
        run_release_workflow(&args("staging"), &Config::default(), &host, &NullReporter)
            .unwrap_err();
    assert!(err.to_string().contains("Unknown environment"));
    assert!(host.upserted_refs().is_empty());
}

#[test]
fn test_dry_run_mutates_nothing() {
    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");
    host.add_commit("c1c1c1c1c1c1c1c1", "feat: preview");

    let mut dry = args("prod");
    dry.dry_run = true;

    let result = run_release_workflow(&dry, &Config::default(), &host, &NullReporter).unwrap();
    assert_eq!(result.tag, "1.1.0");
    assert!(!result.published);
    assert!(!result.changelog.is_empty());

    assert!(host.upserted_refs().is_empty());
    assert!(host.deleted_releases().is_empty());
    assert!(host.created_releases().is_empty());
}

#[test]
fn test_fixed_tag_replaces_prior_release() {
    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");
    host.add_commit("a2a2a2a2a2a2a2a2", "fix: nightly fixups");

    let mut fixed = args("prod");
    fixed.fixed_tag = Some("latest".to_string());
    fixed.title = Some("Development Build".to_string());

    let result = run_release_workflow(&fixed, &Config::default(), &host, &NullReporter).unwrap();
    assert_eq!(result.tag, "latest");

    assert_eq!(host.deleted_releases(), vec!["latest".to_string()]);
    let releases = host.created_releases();
    assert_eq!(releases[0].tag, "latest");
    assert_eq!(releases[0].title, "Development Build");
    let refs = host.upserted_refs();
    assert_eq!(refs[0].0, "latest");
}

#[test]
fn test_unparseable_commits_are_skipped_not_fatal() {
    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");
    host.add_commit("a3a3a3a3a3a3a3a3", "");
    host.add_commit("a4a4a4a4a4a4a4a4", "feat: still here");

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();
    assert_eq!(result.tag, "1.1.0");
    assert!(result.changelog.contains("still here"));
}

#[test]
fn test_empty_range_still_releases_patch() {
    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();
    assert_eq!(result.tag, "1.0.1");
    assert_eq!(result.changelog, "");

    // The release is still published, with an empty body
    let releases = host.created_releases();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].body, "");
}

#[test]
fn test_pull_request_links_appear_in_changelog() {
    use release_publish::domain::PullRequestRef;

    let mut host = MockHost::new();
    host.add_tag("1.0.0", "aaa");
    host.add_commit("a5a5a5a5a5a5a5a5", "feat: reviewed work");
    host.add_pulls(
        "a5a5a5a5a5a5a5a5",
        vec![PullRequestRef {
            number: 42,
            url: "https://example.com/pull/42".to_string(),
        }],
    );

    let result =
        run_release_workflow(&args("prod"), &Config::default(), &host, &NullReporter).unwrap();
    assert!(result.changelog.contains("[#42](https://example.com/pull/42)"));
}
