//! Provenance comments appended to rendered runners.

use crate::template::TemplateKind;

const GENERATED_BY: &str = "// Generated by Cucable from ";

/// Replaces every backslash with a forward slash.
///
/// # Examples
///
/// ```
/// use cucable_runner::normalise_separators;
///
/// assert_eq!(normalise_separators(r"c:\unknown\path"), "c:/unknown/path");
/// ```
#[must_use]
pub fn normalise_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Builds the trailing comment recording which template produced a runner.
///
/// Generic templates record the full normalised path behind an empty
/// `Source Feature:` line. Class templates record only the file name.
///
/// # Examples
///
/// ```
/// use cucable_runner::{TemplateKind, provenance_comment};
///
/// assert_eq!(
///     provenance_comment(&TemplateKind::Generic, r"templates\runner.txt"),
///     "\n\n// Source Feature: \n// Generated by Cucable from templates/runner.txt\n",
/// );
/// ```
#[must_use]
pub fn provenance_comment(kind: &TemplateKind, template_source: &str) -> String {
    let normalised = normalise_separators(template_source);
    match kind {
        TemplateKind::Generic => {
            format!("\n\n// Source Feature: \n{GENERATED_BY}{normalised}\n")
        }
        TemplateKind::Class(_) => {
            let file_name = normalised.rsplit('/').next().unwrap_or(&normalised);
            format!("\n\n{GENERATED_BY}{file_name}\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn class_kind() -> TemplateKind {
        TemplateKind::detect("class Existing {}\n")
    }

    #[rstest]
    #[case("pathToTemplate", "pathToTemplate")]
    #[case(r"c:\unknown\path", "c:/unknown/path")]
    #[case("src/test/runner.txt", "src/test/runner.txt")]
    fn generic_comment_uses_full_normalised_path(#[case] source: &str, #[case] shown: &str) {
        assert_eq!(
            provenance_comment(&TemplateKind::Generic, source),
            format!("\n\n// Source Feature: \n// Generated by Cucable from {shown}\n")
        );
    }

    #[rstest]
    #[case("MyClass.java", "MyClass.java")]
    #[case("src/test/java/runners/MyClass.java", "MyClass.java")]
    #[case(r"c:\src\runners\MyClass.java", "MyClass.java")]
    fn class_comment_uses_file_name_only(#[case] source: &str, #[case] shown: &str) {
        assert_eq!(
            provenance_comment(&class_kind(), source),
            format!("\n\n// Generated by Cucable from {shown}\n")
        );
    }
}
