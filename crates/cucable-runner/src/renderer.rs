//! The runner file content renderer.

use tracing::{debug, warn};

use crate::RUNNER_PLACEHOLDER;
use crate::descriptor::RunnerDescriptor;
use crate::errors::{Malformation, RenderError};
use crate::features::substitute_features;
use crate::provenance::provenance_comment;
use crate::reader::TemplateReader;
use crate::template::TemplateKind;

/// Switches that change how templates are rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail with [`RenderError::TemplateMalformed`] instead of degrading to
    /// best-effort output.
    pub strict: bool,
    /// Keep package declarations of class templates instead of blanking them.
    pub keep_package_declarations: bool,
}

impl RenderOptions {
    /// Returns options with strict rendering switched on or off.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns options that keep or blank class template package lines.
    #[must_use]
    pub const fn with_keep_package_declarations(mut self, keep: bool) -> Self {
        self.keep_package_declarations = keep;
        self
    }
}

/// Renders runner source text from a template and a [`RunnerDescriptor`].
///
/// The renderer holds no mutable state. Rendering the same descriptor against
/// the same template text always yields identical output, and a renderer
/// whose reader is `Sync` can serve several threads at once.
#[derive(Clone, Debug)]
pub struct RunnerRenderer<R> {
    reader: R,
    options: RenderOptions,
}

impl<R: TemplateReader> RunnerRenderer<R> {
    /// Creates a renderer with default options.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, RenderOptions::default())
    }

    /// Creates a renderer with explicit options.
    #[must_use]
    pub const fn with_options(reader: R, options: RenderOptions) -> Self {
        Self { reader, options }
    }

    /// Returns the options in effect.
    #[must_use]
    pub const fn options(&self) -> RenderOptions {
        self.options
    }

    /// Reads the descriptor's template and renders the runner source.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateRead`] when the template cannot be
    /// read, and [`RenderError::TemplateMalformed`] when strict rendering is
    /// enabled and the template structure is unexpected.
    pub fn render(&self, descriptor: &RunnerDescriptor) -> Result<String, RenderError> {
        let path = descriptor.template_source();
        let template = self
            .reader
            .read_content_from_file(path)
            .map_err(|source| RenderError::TemplateRead {
                path: path.to_owned(),
                source,
            })?;
        self.render_template(descriptor, &template)
    }

    /// Renders already-loaded template text for the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateMalformed`] when strict rendering is
    /// enabled and the template structure is unexpected.
    pub fn render_template(
        &self,
        descriptor: &RunnerDescriptor,
        template: &str,
    ) -> Result<String, RenderError> {
        let kind = TemplateKind::detect(template);
        debug!(
            template = descriptor.template_source(),
            runner = descriptor.target_name(),
            class_template = matches!(kind, TemplateKind::Class(_)),
            "rendering runner"
        );

        let mut malformations = Vec::new();
        let body = match &kind {
            TemplateKind::Generic => template.to_owned(),
            TemplateKind::Class(class) => {
                let (rewritten, malformation) = class.rewrite(
                    template,
                    descriptor.target_name(),
                    self.options.keep_package_declarations,
                );
                malformations.extend(malformation);
                rewritten
            }
        };

        let (body, feature_malformations) =
            substitute_features(&body, descriptor.feature_file_names());
        malformations.extend(feature_malformations);
        self.check_malformations(descriptor, malformations)?;

        let mut rendered = body.replace(RUNNER_PLACEHOLDER, descriptor.target_name());
        rendered.push_str(&provenance_comment(&kind, descriptor.template_source()));
        Ok(rendered)
    }

    fn check_malformations(
        &self,
        descriptor: &RunnerDescriptor,
        malformations: Vec<Malformation>,
    ) -> Result<(), RenderError> {
        for malformation in malformations {
            if self.options.strict {
                return Err(RenderError::TemplateMalformed {
                    path: descriptor.template_source().to_owned(),
                    malformation,
                });
            }
            warn!(
                template = descriptor.template_source(),
                runner = descriptor.target_name(),
                %malformation,
                "rendering runner on a best-effort basis"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::io;

    use rstest::{fixture, rstest};

    use super::*;

    struct Fixed(&'static str);

    impl TemplateReader for Fixed {
        fn read_content_from_file(&self, _path: &str) -> io::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    struct Missing;

    impl TemplateReader for Missing {
        fn read_content_from_file(&self, path: &str) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, format!("{path} not found")))
        }
    }

    #[fixture]
    fn two_features() -> RunnerDescriptor {
        RunnerDescriptor::new(
            "Lonely.java",
            "Runner",
            vec!["one".to_owned(), "two".to_owned()],
        )
        .expect("valid descriptor")
    }

    #[test]
    fn read_failures_propagate_with_path() {
        let descriptor =
            RunnerDescriptor::new("absent.txt", "Runner", vec!["f".to_owned()]).expect("valid");
        let err = RunnerRenderer::new(Missing)
            .render(&descriptor)
            .expect_err("missing template should fail");
        let RenderError::TemplateRead { path, source } = err else {
            panic!("expected a read error");
        };
        assert_eq!(path, "absent.txt");
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn lenient_rendering_degrades_on_malformed_class(two_features: RunnerDescriptor) {
        let renderer = RunnerRenderer::new(Fixed("class Lonely { [CUCABLE:FEATURE] }\n"));
        let rendered = renderer.render(&two_features).expect("lenient render");
        assert_eq!(
            rendered,
            "class Runner { one,\ntwo }\n\n\n// Generated by Cucable from Lonely.java\n"
        );
    }

    #[rstest]
    fn strict_rendering_rejects_malformed_class(two_features: RunnerDescriptor) {
        let renderer = RunnerRenderer::with_options(
            Fixed("class Lonely { [CUCABLE:FEATURE] }\n"),
            RenderOptions::default().with_strict(true),
        );
        let err = renderer
            .render(&two_features)
            .expect_err("strict render should fail");
        assert!(matches!(
            err,
            RenderError::TemplateMalformed {
                malformation: Malformation::MissingPackageOrImports { .. },
                ..
            }
        ));
    }

    #[test]
    fn template_without_placeholders_only_gains_comment() {
        let descriptor =
            RunnerDescriptor::new("plain.txt", "Runner", vec!["f".to_owned()]).expect("valid");
        let rendered = RunnerRenderer::new(Fixed("just text\n"))
            .render(&descriptor)
            .expect("render");
        assert_eq!(
            rendered,
            "just text\n\n\n// Source Feature: \n// Generated by Cucable from plain.txt\n"
        );
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RunnerRenderer<crate::FsTemplateReader>>();
    }
}
