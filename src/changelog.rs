//! Changelog rendering
//!
//! Groups classified commits into sections by conventional type and
//! renders deterministic markdown. Sections appear in lexicographic
//! title order; within a section commits keep the input order, which is
//! the hosting platform's native comparison order.

use crate::domain::commit::ClassifiedCommit;
use std::collections::BTreeMap;

/// Render the grouped changelog for a commit range.
///
/// Merge commits are omitted; reverts appear under "Reverts". Empty
/// sections are dropped entirely and an empty input renders to an empty
/// string. Rendering is a pure function of its input, so repeated calls
/// yield byte-identical output.
pub fn render_changelog(commits: &[ClassifiedCommit]) -> String {
    // BTreeMap keys give the lexicographic section order for free.
    let mut sections: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    for commit in commits {
        if commit.is_merge {
            continue;
        }
        sections
            .entry(commit.r#type.section_title())
            .or_default()
            .push(format_entry(commit));
    }

    let mut changelog = String::new();
    for (title, entries) in &sections {
        if !changelog.is_empty() {
            changelog.push('\n');
        }
        changelog.push_str("## ");
        changelog.push_str(title);
        changelog.push_str("\n\n");
        for entry in entries {
            changelog.push_str(entry);
            changelog.push('\n');
        }
    }

    changelog
}

fn format_entry(commit: &ClassifiedCommit) -> String {
    let mut entry = format!(
        "* {} ([{}]({}))",
        commit.header,
        short_commit_id(&commit.source_id),
        commit.source_url
    );

    for pr in &commit.pull_requests {
        entry.push_str(&format!(" [#{}]({})", pr.number, pr.url));
    }

    for block in [commit.body.as_deref(), commit.footer.as_deref()]
        .into_iter()
        .flatten()
    {
        for line in block.lines() {
            entry.push_str("\n  ");
            entry.push_str(line);
        }
    }

    entry
}

/// Abbreviate a commit id to the conventional 7 characters.
pub fn short_commit_id(id: &str) -> &str {
    if id.len() > 7 {
        &id[..7]
    } else {
        id
    }
}
