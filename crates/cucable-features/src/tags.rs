//! Tag normalisation and merging.
//!
//! Tags are compared in `@tag` form so filters behave the same whether the
//! parser or the user supplied the leading `@`.

use std::collections::HashSet;

/// Returns `tag` trimmed and prefixed with `@`.
pub(crate) fn normalise_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.starts_with('@') {
        trimmed.to_owned()
    } else {
        format!("@{trimmed}")
    }
}

/// Extend the destination tag set with new values, preserving order and
/// removing duplicates.
pub(crate) fn extend_tag_set(target: &mut Vec<String>, additions: &[String]) {
    for tag in target.iter_mut() {
        *tag = normalise_tag(tag);
    }

    let mut seen = HashSet::new();
    target.retain(|tag| seen.insert(tag.clone()));

    for tag in additions {
        let formatted = normalise_tag(tag);
        if !target.iter().any(|existing| existing == &formatted) {
            target.push(formatted);
        }
    }
}

/// Merge two tag sets, preserving insertion order and de-duplicating values.
pub(crate) fn merge_tag_sets(base: &[String], additions: &[String]) -> Vec<String> {
    let mut merged = base.to_vec();
    extend_tag_set(&mut merged, additions);
    merged
}

/// Returns `true` when any of `tags` appears in `excluded`.
pub(crate) fn is_excluded(tags: &[String], excluded: &[String]) -> bool {
    tags.iter()
        .any(|tag| excluded.iter().any(|ex| normalise_tag(ex) == normalise_tag(tag)))
}
