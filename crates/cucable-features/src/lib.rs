//! Feature file splitting for Cucable.
//!
//! Each scenario of a source feature, and each examples row of a scenario
//! outline, becomes a self-contained feature file that keeps the feature
//! header and any inherited background steps. Generated features are named
//! `<FeatureStem>_scenario<NNN>_run<NNN>_IT` so the runner generator can use
//! the same name for the runner class.
//!
//! # Example
//!
//! ```
//! use cucable_features::{SplitOptions, split_feature};
//!
//! let text = "Feature: Login\n  Scenario: ok\n    Given a user\n";
//! let generated = split_feature("Login", text, &SplitOptions::default())?;
//! assert_eq!(generated.len(), 1);
//! assert_eq!(generated[0].name(), "Login_scenario001_run001_IT");
//! assert!(generated[0].content().contains("Scenario: ok"));
//! # Ok::<(), cucable_features::SplitError>(())
//! ```

mod errors;
mod scenario;
mod source;
mod split;
mod tags;
mod writer;

pub use errors::{SourceError, SplitError};
pub use source::{SourceFeatures, collect_feature_files, read_feature};
pub use split::{GeneratedFeature, SplitOptions, generated_feature_name, split_feature};
