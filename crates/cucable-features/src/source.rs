//! Source feature selection and discovery.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::errors::SourceError;

const FEATURE_EXTENSION: &str = "feature";

/// The source features to split, optionally narrowed to one scenario line.
///
/// # Examples
///
/// ```
/// use cucable_features::SourceFeatures;
///
/// let source = SourceFeatures::parse("features/login.feature:12");
/// assert_eq!(source.path().as_str(), "features/login.feature");
/// assert_eq!(source.line(), Some(12));
///
/// let whole = SourceFeatures::parse(r"c:\features");
/// assert_eq!(whole.path().as_str(), r"c:\features");
/// assert_eq!(whole.line(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFeatures {
    path: Utf8PathBuf,
    line: Option<usize>,
}

impl SourceFeatures {
    /// Parses `path[:line]`.
    ///
    /// The suffix after the last colon is treated as a line number only when
    /// it parses as one; otherwise the whole input is the path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Some((path, suffix)) = raw.rsplit_once(':') {
            if let Ok(line) = suffix.trim().parse::<usize>() {
                return Self {
                    path: Utf8PathBuf::from(path.trim()),
                    line: Some(line),
                };
            }
        }
        Self {
            path: Utf8PathBuf::from(raw.trim()),
            line: None,
        }
    }

    /// Returns the feature file or directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the requested scenario line, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Returns `true` when the input was blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.as_str().is_empty()
    }
}

/// Lists the feature files named by `path`.
///
/// A file path must carry the `.feature` extension. A directory is searched
/// recursively and the results are sorted so generated names are stable.
///
/// # Errors
///
/// Returns [`SourceError::Access`] when the path cannot be inspected and
/// [`SourceError::NotAFeatureFile`] when a file lacks the `.feature`
/// extension.
pub fn collect_feature_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SourceError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => {
            let mut found = Vec::new();
            collect_from_dir(&dir, path, &mut found)?;
            found.sort();
            Ok(found)
        }
        Err(_) => single_feature_file(path),
    }
}

/// Reads a feature file through `cap-std`.
///
/// # Errors
///
/// Returns [`SourceError::Access`] when the file cannot be read.
pub fn read_feature(path: &Utf8Path) -> Result<String, SourceError> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name).map_err(|source| SourceError::Access {
        path: path.to_owned(),
        source,
    })
}

fn single_feature_file(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SourceError> {
    let (dir, name) = open_parent(path)?;
    let metadata = dir.metadata(name).map_err(|source| SourceError::Access {
        path: path.to_owned(),
        source,
    })?;
    if metadata.is_file() && path.extension() == Some(FEATURE_EXTENSION) {
        Ok(vec![path.to_owned()])
    } else {
        Err(SourceError::NotAFeatureFile(path.to_owned()))
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), SourceError> {
    let access = |source| SourceError::Access {
        path: path.to_owned(),
        source,
    };
    let name = path.file_name().ok_or_else(|| {
        access(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path does not name a file",
        ))
    })?;
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(access)?;
    Ok((dir, name))
}

fn collect_from_dir(
    dir: &Dir,
    prefix: &Utf8Path,
    found: &mut Vec<Utf8PathBuf>,
) -> Result<(), SourceError> {
    let access = |source| SourceError::Access {
        path: prefix.to_owned(),
        source,
    };
    for entry in dir.entries().map_err(access)? {
        let entry = entry.map_err(access)?;
        let name = entry.file_name().map_err(access)?;
        let file_type = entry.file_type().map_err(access)?;
        let entry_path = prefix.join(&name);
        if file_type.is_dir() {
            let child = dir.open_dir(&name).map_err(access)?;
            collect_from_dir(&child, &entry_path, found)?;
        } else if file_type.is_file() && entry_path.extension() == Some(FEATURE_EXTENSION) {
            found.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a.feature", "a.feature", None)]
    #[case("a.feature:7", "a.feature", Some(7))]
    #[case(" a.feature : 7 ", "a.feature", Some(7))]
    #[case("c:/suite/a.feature:42", "c:/suite/a.feature", Some(42))]
    #[case(r"c:\suite", r"c:\suite", None)]
    #[case("a.feature:x", "a.feature:x", None)]
    fn parses_optional_line_suffix(
        #[case] raw: &str,
        #[case] path: &str,
        #[case] line: Option<usize>,
    ) {
        let parsed = SourceFeatures::parse(raw);
        assert_eq!(parsed.path().as_str(), path);
        assert_eq!(parsed.line(), line);
    }

    #[test]
    fn collects_feature_files_recursively_and_sorted() {
        let root = tempfile::tempdir().expect("temp dir");
        let base = root.path();
        std::fs::create_dir_all(base.join("nested")).expect("nested dir");
        std::fs::write(base.join("b.feature"), "Feature: B\n").expect("write b");
        std::fs::write(base.join("nested/a.feature"), "Feature: A\n").expect("write a");
        std::fs::write(base.join("notes.txt"), "ignored").expect("write notes");

        let root_path = Utf8Path::from_path(base).expect("utf-8 temp dir");
        let found = collect_feature_files(root_path).expect("collect");
        assert_eq!(
            found,
            vec![root_path.join("b.feature"), root_path.join("nested/a.feature")]
        );
    }

    #[test]
    fn rejects_files_without_feature_extension() {
        let root = tempfile::tempdir().expect("temp dir");
        let file = root.path().join("notes.txt");
        std::fs::write(&file, "text").expect("write");
        let path = Utf8Path::from_path(&file).expect("utf-8 path");

        let err = collect_feature_files(path).expect_err("non-feature file should fail");
        assert!(matches!(err, SourceError::NotAFeatureFile(_)));
    }

    #[test]
    fn missing_source_reports_access_error() {
        let root = tempfile::tempdir().expect("temp dir");
        let missing = root.path().join("missing.feature");
        let path = Utf8Path::from_path(&missing).expect("utf-8 path");

        let err = collect_feature_files(path).expect_err("missing file should fail");
        assert!(matches!(err, SourceError::Access { .. }));
    }
}
