use crate::error::{ReleasePublishError, Result};
use regex::Regex;
use std::fmt;

/// Raw commit record handed over by the host layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Full commit identifier
    pub id: String,
    /// Full commit message, possibly multi-line
    pub message: String,
    /// Web URL of the commit on the hosting platform
    pub url: String,
    /// Pull requests associated with this commit, if any
    pub pull_requests: Vec<PullRequestRef>,
}

impl RawCommit {
    pub fn new(id: impl Into<String>, message: impl Into<String>, url: impl Into<String>) -> Self {
        RawCommit {
            id: id.into(),
            message: message.into(),
            url: url.into(),
            pull_requests: Vec::new(),
        }
    }
}

/// Reference to a pull request associated with a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub number: u64,
    pub url: String,
}

/// Conventional commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    /// Map a header keyword to its type. Unrecognized keywords return
    /// `None`; the classifier retains those commits as chores.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "feat" => Some(CommitType::Feat),
            "fix" => Some(CommitType::Fix),
            "docs" => Some(CommitType::Docs),
            "style" => Some(CommitType::Style),
            "refactor" => Some(CommitType::Refactor),
            "perf" => Some(CommitType::Perf),
            "test" => Some(CommitType::Test),
            "build" => Some(CommitType::Build),
            "ci" => Some(CommitType::Ci),
            "chore" => Some(CommitType::Chore),
            "revert" => Some(CommitType::Revert),
            _ => None,
        }
    }

    /// Changelog section title for this type.
    pub fn section_title(&self) -> &'static str {
        match self {
            CommitType::Feat => "Features",
            CommitType::Fix => "Bug Fixes",
            CommitType::Docs => "Documentation",
            CommitType::Style => "Styles",
            CommitType::Refactor => "Code Refactoring",
            CommitType::Perf => "Performance Improvements",
            CommitType::Test => "Tests",
            CommitType::Build => "Builds",
            CommitType::Ci => "Continuous Integration",
            CommitType::Chore => "Chores",
            CommitType::Revert => "Reverts",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        };
        write!(f, "{}", keyword)
    }
}

/// Structured record derived once from a raw commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub r#type: CommitType,
    pub scope: Option<String>,
    pub subject: String,
    /// First line of the message
    pub header: String,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub breaking_change: bool,
    pub is_merge: bool,
    pub is_revert: bool,
    pub pull_requests: Vec<PullRequestRef>,
    pub source_id: String,
    pub source_url: String,
}

impl ClassifiedCommit {
    /// Classify a raw commit message.
    ///
    /// Supported header forms:
    /// - `Merge pull request #<n> from <source>`
    /// - `Revert "<original subject>"`
    /// - `type(scope)!: subject` / `type(scope): subject`
    /// - `type!: subject` / `type: subject`
    /// - anything else is retained as a chore
    ///
    /// A message with no extractable header is a classification failure;
    /// the caller skips the commit and continues.
    pub fn parse(raw: &RawCommit) -> Result<Self> {
        let header = raw
            .message
            .lines()
            .next()
            .map(|line| line.trim_end().to_string())
            .unwrap_or_default();

        if header.trim().is_empty() {
            return Err(ReleasePublishError::commit(format!(
                "No header line in commit {}",
                raw.id
            )));
        }

        let (body, footer) = split_body_footer(&raw.message);
        let breaking_change =
            is_breaking_change(body.as_deref()) || is_breaking_change(footer.as_deref());

        let base = ClassifiedCommit {
            r#type: CommitType::Chore,
            scope: None,
            subject: header.clone(),
            header: header.clone(),
            body,
            footer,
            breaking_change,
            is_merge: false,
            is_revert: false,
            pull_requests: raw.pull_requests.clone(),
            source_id: raw.id.clone(),
            source_url: raw.url.clone(),
        };

        // Merge commits are recognized first so their subjects never get
        // misread as conventional headers.
        if let Ok(re) = Regex::new(r"^Merge pull request #\d+ from .+$") {
            if re.is_match(&header) {
                return Ok(ClassifiedCommit {
                    is_merge: true,
                    ..base
                });
            }
        }

        if let Some(captures) = Regex::new(r#"^Revert "(.*)""#)
            .ok()
            .and_then(|re| re.captures(&header))
        {
            let subject = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| header.clone());
            return Ok(ClassifiedCommit {
                r#type: CommitType::Revert,
                subject,
                is_revert: true,
                ..base
            });
        }

        if let Some(captures) = Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)$")
            .ok()
            .and_then(|re| re.captures(&header))
        {
            let keyword = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let subject = captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return Ok(ClassifiedCommit {
                r#type: CommitType::from_keyword(keyword).unwrap_or(CommitType::Chore),
                scope,
                subject,
                breaking_change: base.breaking_change || has_exclamation,
                ..base
            });
        }

        // Non-conventional message: retained as a chore
        Ok(base)
    }
}

/// Extract the declared type keyword from a conventional header, if the
/// header has that shape at all. Used by callers to flag unrecognized
/// types in logs.
pub fn declared_type_keyword(header: &str) -> Option<String> {
    Regex::new(r"^([a-z]+)(?:\([^)]+\))?!?:")
        .ok()
        .and_then(|re| re.captures(header))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split everything after the header into body and footer paragraphs.
///
/// Paragraphs are separated by blank lines. The final paragraph counts as
/// the footer when it opens with a footer token such as `BREAKING CHANGE:`
/// or `Reviewed-by: ...`.
fn split_body_footer(message: &str) -> (Option<String>, Option<String>) {
    let rest = match message.split_once('\n') {
        Some((_, rest)) => rest,
        None => return (None, None),
    };

    let paragraphs: Vec<String> = rest
        .split("\n\n")
        .map(|p| p.trim_matches('\n').trim_end().to_string())
        .filter(|p| !p.trim().is_empty())
        .collect();

    if paragraphs.is_empty() {
        return (None, None);
    }

    let last_is_footer = Regex::new(r"^\s*(BREAKING\s+CHANGES?:|[A-Za-z][A-Za-z-]*:\s|[A-Za-z][A-Za-z-]*\s+#)")
        .ok()
        .map(|re| re.is_match(paragraphs.last().map(String::as_str).unwrap_or_default()))
        .unwrap_or(false);

    if last_is_footer {
        let footer = paragraphs.last().cloned();
        let body = if paragraphs.len() > 1 {
            Some(paragraphs[..paragraphs.len() - 1].join("\n\n"))
        } else {
            None
        };
        (body, footer)
    } else {
        (Some(paragraphs.join("\n\n")), None)
    }
}

/// Breaking-change keyword check: the block must begin with
/// `BREAKING CHANGE:` or `BREAKING CHANGES:` (case-sensitive,
/// whitespace-tolerant).
fn is_breaking_change(block: Option<&str>) -> bool {
    let block = match block {
        Some(b) => b,
        None => return false,
    };
    Regex::new(r"^\s*BREAKING\s+CHANGES?:\s+")
        .map(|re| re.is_match(block))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> ClassifiedCommit {
        let raw = RawCommit::new("abcdef0123456789", message, "https://example.com/c/abcdef0");
        ClassifiedCommit::parse(&raw).unwrap()
    }

    #[test]
    fn test_parse_with_scope() {
        let c = commit("feat(api): add endpoint");
        assert_eq!(c.r#type, CommitType::Feat);
        assert_eq!(c.scope, Some("api".to_string()));
        assert_eq!(c.subject, "add endpoint");
        assert_eq!(c.header, "feat(api): add endpoint");
        assert!(!c.breaking_change);
    }

    #[test]
    fn test_parse_without_scope() {
        let c = commit("fix: bug");
        assert_eq!(c.r#type, CommitType::Fix);
        assert_eq!(c.scope, None);
        assert_eq!(c.subject, "bug");
    }

    #[test]
    fn test_parse_exclamation_marks_breaking() {
        let c = commit("feat(auth)!: redesign login");
        assert!(c.breaking_change);
        let c = commit("refactor!: drop legacy API");
        assert_eq!(c.r#type, CommitType::Refactor);
        assert!(c.breaking_change);
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let c = commit("fix: bug\n\nBREAKING CHANGE: old API removed");
        assert!(c.breaking_change);
        assert_eq!(c.footer.as_deref(), Some("BREAKING CHANGE: old API removed"));
    }

    #[test]
    fn test_parse_breaking_changes_plural_in_body() {
        let c = commit("fix: bug\n\nBREAKING CHANGES: several\n\nSigned-off-by: dev");
        assert!(c.breaking_change);
    }

    #[test]
    fn test_parse_breaking_keyword_is_case_sensitive() {
        let c = commit("fix: bug\n\nbreaking change: nope");
        assert!(!c.breaking_change);
    }

    #[test]
    fn test_parse_merge_commit() {
        let c = commit("Merge pull request #42 from feature-x");
        assert!(c.is_merge);
        assert_eq!(c.r#type, CommitType::Chore);
    }

    #[test]
    fn test_parse_revert_commit() {
        let c = commit("Revert \"feat(api): add endpoint\"");
        assert!(c.is_revert);
        assert_eq!(c.r#type, CommitType::Revert);
        assert_eq!(c.subject, "feat(api): add endpoint");
    }

    #[test]
    fn test_parse_body_and_footer_split() {
        let c = commit("feat: thing\n\nlonger explanation\nover two lines\n\nRefs #12");
        assert_eq!(
            c.body.as_deref(),
            Some("longer explanation\nover two lines")
        );
        assert_eq!(c.footer.as_deref(), Some("Refs #12"));
    }

    #[test]
    fn test_parse_body_only() {
        let c = commit("feat: thing\n\njust an explanation here");
        assert_eq!(c.body.as_deref(), Some("just an explanation here"));
        assert_eq!(c.footer, None);
    }

    #[test]
    fn test_parse_unrecognized_type_retained_as_chore() {
        let c = commit("wip(core): half done");
        assert_eq!(c.r#type, CommitType::Chore);
        assert_eq!(c.scope, Some("core".to_string()));
        assert_eq!(c.subject, "half done");
    }

    #[test]
    fn test_parse_non_conventional_retained_as_chore() {
        let c = commit("Update the build scripts");
        assert_eq!(c.r#type, CommitType::Chore);
        assert_eq!(c.subject, "Update the build scripts");
    }

    #[test]
    fn test_parse_empty_message_fails() {
        let raw = RawCommit::new("abc", "", "https://example.com");
        assert!(ClassifiedCommit::parse(&raw).is_err());
        let raw = RawCommit::new("abc", "   \n\n", "https://example.com");
        assert!(ClassifiedCommit::parse(&raw).is_err());
    }

    #[test]
    fn test_declared_type_keyword() {
        assert_eq!(
            declared_type_keyword("wip(core): half done"),
            Some("wip".to_string())
        );
        assert_eq!(
            declared_type_keyword("feat!: redesign"),
            Some("feat".to_string())
        );
        assert_eq!(declared_type_keyword("Random message"), None);
    }

    #[test]
    fn test_pull_requests_carried_through() {
        let mut raw = RawCommit::new("abc", "feat: x", "https://example.com");
        raw.pull_requests.push(PullRequestRef {
            number: 7,
            url: "https://example.com/pull/7".to_string(),
        });
        let c = ClassifiedCommit::parse(&raw).unwrap();
        assert_eq!(c.pull_requests.len(), 1);
        assert_eq!(c.pull_requests[0].number, 7);
    }
}
