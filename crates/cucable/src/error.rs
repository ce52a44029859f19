//! Error types for configuration and generation.

use std::io;

use camino::Utf8PathBuf;
use cucable_features::{SourceError, SplitError};
use cucable_runner::{DescriptorError, RenderError};
use thiserror::Error;

/// Errors raised while building or validating [`crate::config::Settings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required property is missing or empty.
    #[error("property {0} is not specified")]
    MissingProperty(&'static str),

    /// An exclude tag does not start with `@`.
    #[error("exclude tag '{0}' does not start with an '@'")]
    InvalidExcludeTag(String),

    /// Every scenario must run at least once.
    #[error("number of test runs must be at least 1")]
    ZeroTestRuns,

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum CucableError {
    /// The settings are incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source features could not be located or read.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A source feature could not be split.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// A runner could not be described.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// A runner could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A generated file or output directory could not be written.
    #[error("cannot write `{path}`: {source}")]
    Output {
        /// Path being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_property_names_the_property() {
        let error = ConfigError::MissingProperty("<sourceRunnerTemplateFile>");
        assert_eq!(
            error.to_string(),
            "property <sourceRunnerTemplateFile> is not specified"
        );
    }

    #[test]
    fn invalid_exclude_tag_displays_tag() {
        let error = ConfigError::InvalidExcludeTag("wip".to_owned());
        assert_eq!(
            error.to_string(),
            "exclude tag 'wip' does not start with an '@'"
        );
    }

    #[test]
    fn config_error_is_transparent_in_cucable_error() {
        let error: CucableError = ConfigError::ZeroTestRuns.into();
        assert_eq!(error.to_string(), "number of test runs must be at least 1");
    }

    #[test]
    fn output_error_names_path() {
        let error = CucableError::Output {
            path: Utf8PathBuf::from("target/runners"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.to_string(), "cannot write `target/runners`: denied");
    }
}
