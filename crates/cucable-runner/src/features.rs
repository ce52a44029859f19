//! Feature placeholder substitution.

use std::ops::Range;

use crate::FEATURE_PLACEHOLDER;
use crate::errors::Malformation;

const LIST_SEPARATOR: &str = ",\n";

/// Replaces every feature placeholder with references to `names`.
///
/// A single name is substituted in place. Several names expand each
/// placeholder's enclosing quoted literal into one literal per name, joined
/// by a comma and a line break, so array-like constructs stay valid.
pub(crate) fn substitute_features(text: &str, names: &[String]) -> (String, Vec<Malformation>) {
    match names {
        [single] => (text.replace(FEATURE_PLACEHOLDER, single), Vec::new()),
        _ => expand_feature_lists(text, names),
    }
}

fn expand_feature_lists(text: &str, names: &[String]) -> (String, Vec<Malformation>) {
    let mut out = String::with_capacity(text.len());
    let mut malformations = Vec::new();
    let mut cursor = 0usize;

    while let Some(found) = text
        .get(cursor..)
        .and_then(|rest| rest.find(FEATURE_PLACEHOLDER))
    {
        let position = cursor + found;
        let token_end = position + FEATURE_PLACEHOLDER.len();
        if let Some(literal) = enclosing_literal(text, cursor, position, token_end) {
            out.push_str(text.get(cursor..literal.start).unwrap_or_default());
            let template = text.get(literal.clone()).unwrap_or_default();
            out.push_str(&join_references(template, names));
            cursor = literal.end;
        } else {
            malformations.push(Malformation::UnquotedFeaturePlaceholder { position });
            out.push_str(text.get(cursor..position).unwrap_or_default());
            out.push_str(&names.join(LIST_SEPARATOR));
            cursor = token_end;
        }
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    (out, malformations)
}

/// Locates the double-quoted literal around a placeholder on its own line.
///
/// `floor` bounds the backwards search so text already emitted is never
/// revisited.
fn enclosing_literal(
    text: &str,
    floor: usize,
    position: usize,
    token_end: usize,
) -> Option<Range<usize>> {
    let before = text.get(..position)?;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1).max(floor);
    let open = line_start + text.get(line_start..position)?.rfind('"')?;

    let after = text.get(token_end..)?;
    let line_end = after.find('\n').map_or(text.len(), |idx| token_end + idx);
    let close = token_end + text.get(token_end..line_end)?.find('"')?;
    Some(open..close + 1)
}

fn join_references(template: &str, names: &[String]) -> String {
    names
        .iter()
        .map(|name| template.replace(FEATURE_PLACEHOLDER, name))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
