//! Template classification and class-template rewriting.
//!
//! A template is either a generic text file carrying the runner and feature
//! placeholders, or an existing runner class whose declared type is renamed
//! to the generated runner. The kind is decided once from the template's
//! structure; file extensions play no part.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::RUNNER_PLACEHOLDER;
use crate::errors::Malformation;

/// Matches a type declaration line and captures the declared name, which is
/// either an identifier or the runner placeholder.
static TYPE_DECLARATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:@[A-Za-z_][\w.]*(?:\([^)\n]*\))?[ \t]+)*(?:(?:public|protected|private|abstract|final|static|sealed|open|internal|data|strictfp)[ \t]+)*(?:class|interface|enum|record|object)[ \t]+({}|[A-Za-z_$][\w$]*)",
        regex::escape(RUNNER_PLACEHOLDER)
    ))
    .ok()
});

static IDENTIFIER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\w$]+").ok());

/// Matches a whole package declaration, leaving the line break in place.
static PACKAGE_DECLARATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*package[ \t]+[A-Za-z_][\w.]*[ \t]*;?[ \t]*").ok());

static IMPORT_DECLARATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import[ \t]+\S").ok());

/// The two shapes of runner template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// A text template addressed only through placeholders.
    Generic,
    /// An existing runner class used as the template.
    Class(ClassTemplate),
}

impl TemplateKind {
    /// Classifies template text.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucable_runner::TemplateKind;
    ///
    /// let generic = TemplateKind::detect("public class [CUCABLE:RUNNER] {}\n");
    /// assert_eq!(generic, TemplateKind::Generic);
    ///
    /// let class = TemplateKind::detect("package a;\npublic class MyRunner {}\n");
    /// assert!(matches!(class, TemplateKind::Class(ref c) if c.type_name() == "MyRunner"));
    /// ```
    #[must_use]
    pub fn detect(text: &str) -> Self {
        declared_type_name(text).map_or(Self::Generic, |type_name| {
            Self::Class(ClassTemplate {
                type_name: type_name.to_owned(),
            })
        })
    }
}

/// Returns the first declared type name, or `None` when no declaration
/// exists or any declaration is named by the runner placeholder.
fn declared_type_name(text: &str) -> Option<&str> {
    let regex = TYPE_DECLARATION.as_ref()?;
    let names: Vec<&str> = regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .collect();
    if names.contains(&RUNNER_PLACEHOLDER) {
        return None;
    }
    names.first().copied()
}

/// An existing runner class reused as a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTemplate {
    type_name: String,
}

impl ClassTemplate {
    /// Returns the type name declared by the template.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Renames the declared type to `target_name` and, unless asked to keep
    /// them, blanks package declarations.
    ///
    /// Anything before the first package declaration is blanked, keeping its
    /// line breaks. The old type name is replaced wherever it appears as a
    /// whole identifier outside import lines; longer identifiers that merely
    /// contain it are kept. A template without package or import lines is
    /// reported as a [`Malformation`] alongside the best-effort rewrite.
    pub(crate) fn rewrite(
        &self,
        text: &str,
        target_name: &str,
        keep_package_declarations: bool,
    ) -> (String, Option<Malformation>) {
        let malformation = (!has_package_or_imports(text)).then(|| {
            Malformation::MissingPackageOrImports {
                type_name: self.type_name.clone(),
            }
        });

        let renamed = self.rename(&blank_leading_boilerplate(text), target_name);
        let rewritten = if keep_package_declarations {
            renamed
        } else {
            strip_package_declarations(&renamed)
        };
        (rewritten, malformation)
    }

    fn rename(&self, text: &str, target_name: &str) -> String {
        let Some(identifier) = IDENTIFIER.as_ref() else {
            return text.replace(&self.type_name, target_name);
        };
        text.split_inclusive('\n')
            .map(|line| {
                if line.trim_start().starts_with("import ") {
                    return line.to_owned();
                }
                identifier
                    .replace_all(line, |caps: &Captures<'_>| {
                        let token = caps.get(0).map_or("", |m| m.as_str());
                        if token == self.type_name {
                            target_name.to_owned()
                        } else {
                            token.to_owned()
                        }
                    })
                    .into_owned()
            })
            .collect()
    }
}

/// Replaces everything before the first package declaration with its line
/// breaks.
fn blank_leading_boilerplate(text: &str) -> String {
    let start = PACKAGE_DECLARATION
        .as_ref()
        .and_then(|regex| regex.find(text))
        .map_or(0, |found| found.start());
    let (Some(head), Some(rest)) = (text.get(..start), text.get(start..)) else {
        return text.to_owned();
    };
    let mut out: String = head.chars().filter(|c| *c == '\n').collect();
    out.push_str(rest);
    out
}

fn has_package_or_imports(text: &str) -> bool {
    [&*PACKAGE_DECLARATION, &*IMPORT_DECLARATION]
        .into_iter()
        .flatten()
        .any(|regex| regex.is_match(text))
}

fn strip_package_declarations(text: &str) -> String {
    match PACKAGE_DECLARATION.as_ref() {
        Some(regex) => regex.replace_all(text, "").into_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::placeholder_class("package parallel;\npublic class [CUCABLE:RUNNER] {\n}\n")]
    #[case::no_declaration("features = {\"[CUCABLE:FEATURE]\"}\n")]
    #[case::prose_mentioning_class("// this class runs the suite\n")]
    #[case::empty("")]
    #[case::nested_type(
        "package parallel;\nimport x.Y;\npublic class [CUCABLE:RUNNER] {\n    static class Hooks {}\n}\n"
    )]
    fn generic_templates_are_detected(#[case] text: &str) {
        assert_eq!(TemplateKind::detect(text), TemplateKind::Generic);
    }

    #[rstest]
    #[case::java("package a;\n\npublic class MyClass {\n}\n", "MyClass")]
    #[case::annotated("@RunWith(Cucumber.class) public final class Runner {}\n", "Runner")]
    #[case::kotlin("package a\n\nclass KotlinRunner\n", "KotlinRunner")]
    #[case::interface("interface Marker {}\n", "Marker")]
    fn class_templates_capture_type_name(#[case] text: &str, #[case] expected: &str) {
        let TemplateKind::Class(class) = TemplateKind::detect(text) else {
            panic!("expected a class template for {text:?}");
        };
        assert_eq!(class.type_name(), expected);
    }

    #[test]
    fn rewrite_renames_type_and_blanks_packages() {
        let class = ClassTemplate {
            type_name: "MyClass".to_owned(),
        };
        let text = "package parallel;\n\npackage some.package;\nimport a.B;\n\
                    public class MyClass {\n    MyClass() {}\n}\n";
        let (rewritten, malformation) = class.rewrite(text, "RunnerClass", false);
        assert_eq!(
            rewritten,
            "\n\n\nimport a.B;\npublic class RunnerClass {\n    RunnerClass() {}\n}\n"
        );
        assert_eq!(malformation, None);
    }

    #[test]
    fn rewrite_can_keep_package_declarations() {
        let class = ClassTemplate {
            type_name: "MyClass".to_owned(),
        };
        let text = "package parallel;\nimport a.B;\nclass MyClass {}\n";
        let (rewritten, _) = class.rewrite(text, "Runner", true);
        assert_eq!(rewritten, "package parallel;\nimport a.B;\nclass Runner {}\n");
    }

    #[test]
    fn rewrite_flags_missing_package_and_imports() {
        let class = ClassTemplate {
            type_name: "Lonely".to_owned(),
        };
        let (rewritten, malformation) = class.rewrite("class Lonely {}\n", "Runner", false);
        assert_eq!(rewritten, "class Runner {}\n");
        assert_eq!(
            malformation,
            Some(Malformation::MissingPackageOrImports {
                type_name: "Lonely".to_owned()
            })
        );
    }

    #[test]
    fn rewrite_keeps_imports_and_longer_identifiers() {
        let class = ClassTemplate {
            type_name: "ParallelRunner".to_owned(),
        };
        let text = "package a;\nimport org.example.ParallelRunnerBase;\n\
                    public class ParallelRunner extends ParallelRunnerBase {\n\
                    \x20   ParallelRunner() {}\n}\n";
        let (rewritten, _) = class.rewrite(text, "Login_IT", false);
        assert_eq!(
            rewritten,
            "\nimport org.example.ParallelRunnerBase;\n\
             public class Login_IT extends ParallelRunnerBase {\n\
             \x20   Login_IT() {}\n}\n"
        );
    }

    #[test]
    fn rewrite_blanks_boilerplate_before_package() {
        let class = ClassTemplate {
            type_name: "MyClass".to_owned(),
        };
        let text = "/* Copyright MyClass authors */\n// header\npackage a;\nimport x.Y;\n\
                    public class MyClass {\n}\n";
        let (rewritten, _) = class.rewrite(text, "Runner", false);
        assert_eq!(rewritten, "\n\n\nimport x.Y;\npublic class Runner {\n}\n");

        let (kept, _) = class.rewrite(text, "Runner", true);
        assert_eq!(kept, "\n\npackage a;\nimport x.Y;\npublic class Runner {\n}\n");
    }
}
