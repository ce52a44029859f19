//! Cucable: parallel runner generation for Gherkin suites.
//!
//! The [`generate`] entry point splits the configured source features into
//! one feature file per scenario, groups the generated features into
//! runners, and renders each runner from the configured template.
//! [`config::Settings`] carries every option and [`logging::init_logging`]
//! installs the `tracing` subscriber used by the binary.

pub mod config;
pub mod error;
mod generate;
pub mod logging;

pub use generate::{GenerationReport, MULTI_RUNNER_PREFIX, generate};
