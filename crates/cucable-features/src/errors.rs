//! Errors raised while locating and splitting feature files.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced while splitting a feature file into scenarios.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The feature text is not valid Gherkin.
    #[error("failed to parse feature `{feature}`: {source}")]
    Parse {
        /// Name of the feature being split.
        feature: String,
        /// Error reported by the Gherkin parser.
        #[source]
        source: gherkin::ParseError,
    },
    /// No scenario starts on the requested line.
    #[error("feature `{feature}` has no scenario on line {line}")]
    LineNotFound {
        /// Name of the feature being split.
        feature: String,
        /// Requested one-based line number.
        line: usize,
    },
}

/// Errors surfaced while collecting source feature files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source path does not exist or cannot be inspected.
    #[error("cannot access source features `{path}`: {source}")]
    Access {
        /// Path that was inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The source path is a file without the `.feature` extension.
    #[error("source `{0}` is not a .feature file")]
    NotAFeatureFile(Utf8PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_not_found_names_feature_and_line() {
        let err = SplitError::LineNotFound {
            feature: "login".to_owned(),
            line: 12,
        };
        assert_eq!(err.to_string(), "feature `login` has no scenario on line 12");
    }

    #[test]
    fn access_error_names_path() {
        let err = SourceError::Access {
            path: Utf8PathBuf::from("features/missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "cannot access source features `features/missing`: not found"
        );
    }
}
