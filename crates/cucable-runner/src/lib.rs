//! Runner file rendering for Cucable.
//!
//! Cucable splits a Gherkin suite into one feature file per scenario and
//! generates a runner source file for each group of generated features, so a
//! build tool can execute the groups in parallel. This crate holds the
//! rendering core: the [`RunnerDescriptor`] describing one runner, the
//! [`TemplateKind`] classification of the template text, and the
//! [`RunnerRenderer`] producing the final runner source.
//!
//! # Example
//!
//! ```
//! use std::io;
//!
//! use cucable_runner::{RunnerDescriptor, RunnerRenderer, TemplateReader};
//!
//! struct Inline;
//!
//! impl TemplateReader for Inline {
//!     fn read_content_from_file(&self, _path: &str) -> io::Result<String> {
//!         Ok("class [CUCABLE:RUNNER] { \"[CUCABLE:FEATURE].feature\" }\n".to_owned())
//!     }
//! }
//!
//! let descriptor = RunnerDescriptor::new("runner.txt", "Login_IT", vec!["Login_IT".into()])?;
//! let rendered = RunnerRenderer::new(Inline).render(&descriptor)?;
//! assert!(rendered.starts_with("class Login_IT { \"Login_IT.feature\" }"));
//! assert!(rendered.ends_with("// Generated by Cucable from runner.txt\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod descriptor;
mod errors;
mod features;
mod provenance;
mod reader;
mod renderer;
mod template;

pub use descriptor::RunnerDescriptor;
pub use errors::{DescriptorError, Malformation, RenderError};
pub use provenance::{normalise_separators, provenance_comment};
pub use reader::{FsTemplateReader, TemplateReader};
pub use renderer::{RenderOptions, RunnerRenderer};
pub use template::{ClassTemplate, TemplateKind};

/// Placeholder replaced with the runner (class) name.
pub const RUNNER_PLACEHOLDER: &str = "[CUCABLE:RUNNER]";

/// Placeholder replaced with the referenced feature file name(s).
pub const FEATURE_PLACEHOLDER: &str = "[CUCABLE:FEATURE]";
