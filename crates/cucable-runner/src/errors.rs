//! Error types for descriptor construction and runner rendering.

use std::fmt;
use std::io;

use thiserror::Error;

/// Structural problems found in a template that prevent a clean rewrite.
///
/// Malformations are soft: the renderer logs them and keeps going unless
/// strict rendering was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// A class-like template has neither a package declaration nor imports.
    MissingPackageOrImports {
        /// Name of the type declared by the template.
        type_name: String,
    },
    /// A feature placeholder has no enclosing double quotes on its line, so
    /// it cannot be expanded into a list of quoted references.
    UnquotedFeaturePlaceholder {
        /// Byte offset of the placeholder in the template text.
        position: usize,
    },
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPackageOrImports { type_name } => write!(
                f,
                "class template `{type_name}` has no package or import section"
            ),
            Self::UnquotedFeaturePlaceholder { position } => write!(
                f,
                "feature placeholder at byte {position} (zero-based) is not enclosed in quotes"
            ),
        }
    }
}

/// Errors raised while building a [`crate::RunnerDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The runner name was empty or blank.
    #[error("runner name must not be blank")]
    BlankTargetName,
    /// No feature file names were supplied.
    #[error("runner `{target_name}` must reference at least one feature file")]
    NoFeatureFiles {
        /// Runner that was being described.
        target_name: String,
    },
}

/// Errors surfaced while rendering a runner.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be read.
    #[error("failed to read runner template `{path}`: {source}")]
    TemplateRead {
        /// Template path as given in the descriptor.
        path: String,
        /// Error reported by the template reader.
        #[source]
        source: io::Error,
    },
    /// The template structure is unexpected and strict rendering is enabled.
    #[error("malformed runner template `{path}`: {malformation}")]
    TemplateMalformed {
        /// Template path as given in the descriptor.
        path: String,
        /// What the renderer could not locate.
        malformation: Malformation,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn template_read_error_keeps_io_source() {
        let err = RenderError::TemplateRead {
            path: "runner.txt".to_owned(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read runner template `runner.txt`: no such file"
        );
        assert!(err.source().is_some_and(|s| s.to_string() == "no such file"));
    }

    #[test]
    fn malformed_error_describes_unquoted_placeholder() {
        let err = RenderError::TemplateMalformed {
            path: "Runner.java".to_owned(),
            malformation: Malformation::UnquotedFeaturePlaceholder { position: 12 },
        };
        assert_eq!(
            err.to_string(),
            "malformed runner template `Runner.java`: feature placeholder at byte 12 \
             (zero-based) is not enclosed in quotes"
        );
    }

    #[test]
    fn descriptor_error_names_runner() {
        let err = DescriptorError::NoFeatureFiles {
            target_name: "Login_IT".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "runner `Login_IT` must reference at least one feature file"
        );
    }
}
