use crate::domain::tag::{classify_tag, ReleasePolicy, Tag, TagRules};
use semver::Version;

/// Select the most relevant prior release tag under a policy.
///
/// Filters the tag set through the tag classifier, then takes the tag
/// with the maximum version in the semver total order (a release sorts
/// above its own pre-releases). Returns `None` when no valid tag exists,
/// which callers treat as "first release" and fall back to full history.
pub fn resolve_previous_tag(tags: &[Tag], policy: ReleasePolicy, rules: &TagRules) -> Option<Tag> {
    let mut candidates: Vec<(Version, &Tag)> = tags
        .iter()
        .filter_map(|tag| classify_tag(&tag.name, policy, rules).map(|version| (version, tag)))
        .collect();

    // Descending by version; the sort is stable so ties keep the
    // platform's listing order.
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates.first().map(|(_, tag)| (*tag).clone())
}
