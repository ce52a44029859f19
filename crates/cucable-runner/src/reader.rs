//! Template reading capability consumed by the renderer.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Reads template text for the renderer.
///
/// Implementations must be side-effect free apart from the read itself; the
/// renderer may call them from several threads at once.
pub trait TemplateReader {
    /// Returns the full text of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file is missing or cannot be
    /// read as UTF-8 text.
    fn read_content_from_file(&self, path: &str) -> io::Result<String>;
}

impl<R: TemplateReader + ?Sized> TemplateReader for &R {
    fn read_content_from_file(&self, path: &str) -> io::Result<String> {
        (**self).read_content_from_file(path)
    }
}

/// Reads templates from the local filesystem through `cap-std`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTemplateReader;

impl FsTemplateReader {
    /// Creates a filesystem-backed reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TemplateReader for FsTemplateReader {
    fn read_content_from_file(&self, path: &str) -> io::Result<String> {
        let path = Utf8Path::new(path);
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("template path `{path}` does not name a file"),
            )
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        dir.read_to_string(file_name)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;

    #[test]
    fn reads_template_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("runner.txt");
        std::fs::write(&path, "class [CUCABLE:RUNNER] {}\n").expect("write template");

        let text = FsTemplateReader::new()
            .read_content_from_file(path.to_str().expect("utf-8 path"))
            .expect("template should be readable");
        assert_eq!(text, "class [CUCABLE:RUNNER] {}\n");
    }

    #[test]
    fn missing_template_reports_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.txt");

        let err = FsTemplateReader::new()
            .read_content_from_file(path.to_str().expect("utf-8 path"))
            .expect_err("missing template should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
