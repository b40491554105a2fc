use crate::domain::commit::{declared_type_keyword, ClassifiedCommit, CommitType, RawCommit};
use crate::domain::version::BumpLevel;
use crate::report::Reporter;

/// Classify a batch of raw commits, skipping unparseable entries.
///
/// Classification failure is per-item and non-fatal: the failing commit
/// is logged through the reporter and dropped. Unrecognized declared
/// types are flagged but retained as chores.
pub fn classify_commits(commits: &[RawCommit], reporter: &dyn Reporter) -> Vec<ClassifiedCommit> {
    commits
        .iter()
        .filter_map(|raw| match ClassifiedCommit::parse(raw) {
            Ok(classified) => {
                if let Some(keyword) = declared_type_keyword(&classified.header) {
                    if CommitType::from_keyword(&keyword).is_none() {
                        reporter.warn(&format!(
                            "Unrecognized commit type '{}' in {}, grouping as chore",
                            keyword, raw.id
                        ));
                    }
                }
                Some(classified)
            }
            Err(e) => {
                reporter.warn(&format!("Skipping commit {}: {}", raw.id, e));
                None
            }
        })
        .collect()
}

/// Reduce a set of classified commits to a single bump decision.
///
/// The whole set is scanned with no early exit so a breaking change late
/// in the range is never missed. Merge commits are excluded; so are
/// reverts (they undo earlier changes in the same range). The decision
/// never comes out as "no bump": every invocation must yield a
/// publishable next version.
pub fn compute_bump(commits: &[ClassifiedCommit]) -> BumpLevel {
    let mut has_breaking = false;
    let mut has_features = false;
    let mut has_fixes = false;

    for commit in commits {
        if commit.is_merge || commit.is_revert {
            continue;
        }

        if commit.breaking_change {
            has_breaking = true;
        }

        match commit.r#type {
            CommitType::Feat => has_features = true,
            CommitType::Fix | CommitType::Perf => has_fixes = true,
            _ => {}
        }
    }

    if has_breaking {
        BumpLevel::Major
    } else if has_features {
        BumpLevel::Minor
    } else if has_fixes {
        BumpLevel::Patch
    } else {
        // Only docs/style/refactor/test/build/ci/chore commits, or an
        // empty range: still a safe patch increment.
        BumpLevel::Patch
    }
}
