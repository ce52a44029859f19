//! Splitting one feature file into per-scenario feature files.

use gherkin::GherkinEnv;
use tracing::debug;

use crate::errors::SplitError;
use crate::scenario::{ConcreteScenario, ConcreteStep, expand_scenario};
use crate::tags::{is_excluded, merge_tag_sets};
use crate::writer::{FeatureHeader, write_feature};

/// Controls which scenarios are emitted and how often.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOptions {
    line: Option<usize>,
    exclude_tags: Vec<String>,
    number_of_test_runs: u32,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            line: None,
            exclude_tags: Vec::new(),
            number_of_test_runs: 1,
        }
    }
}

impl SplitOptions {
    /// Keeps only the scenario declared on `line` (one-based).
    #[must_use]
    pub const fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Skips scenarios carrying any of `tags`.
    #[must_use]
    pub fn with_exclude_tags(mut self, tags: Vec<String>) -> Self {
        self.exclude_tags = tags;
        self
    }

    /// Emits every kept scenario `runs` times.
    #[must_use]
    pub const fn with_number_of_test_runs(mut self, runs: u32) -> Self {
        self.number_of_test_runs = runs;
        self
    }

    /// Returns the requested scenario line.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Returns the excluded tags.
    #[must_use]
    pub fn exclude_tags(&self) -> &[String] {
        &self.exclude_tags
    }

    /// Returns how often each scenario is emitted.
    #[must_use]
    pub const fn number_of_test_runs(&self) -> u32 {
        self.number_of_test_runs
    }
}

/// A feature file holding exactly one scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFeature {
    name: String,
    content: String,
}

impl GeneratedFeature {
    /// Returns the file stem, also used as the runner name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the Gherkin text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the file name including the `.feature` extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.feature", self.name)
    }
}

/// Builds the generated name for one scenario run.
///
/// # Examples
///
/// ```
/// use cucable_features::generated_feature_name;
///
/// assert_eq!(generated_feature_name("Login", 3, 1), "Login_scenario003_run001_IT");
/// ```
#[must_use]
pub fn generated_feature_name(feature_stem: &str, scenario: usize, run: u32) -> String {
    format!("{feature_stem}_scenario{scenario:03}_run{run:03}_IT")
}

/// Splits feature text into one generated feature per scenario and run.
///
/// Scenarios keep their source order. Outline rows count as separate
/// scenarios, and numbering covers only the scenarios that survive the line
/// and tag filters.
///
/// # Errors
///
/// Returns [`SplitError::Parse`] when `text` is not valid Gherkin and
/// [`SplitError::LineNotFound`] when a line filter matches no scenario.
pub fn split_feature(
    feature_stem: &str,
    text: &str,
    options: &SplitOptions,
) -> Result<Vec<GeneratedFeature>, SplitError> {
    let mut text = text.to_owned();
    normalise_trailing_newline(&mut text);
    let feature =
        gherkin::Feature::parse(&text, GherkinEnv::default()).map_err(|source| {
            SplitError::Parse {
                feature: feature_stem.to_owned(),
                source,
            }
        })?;

    let header = FeatureHeader {
        tags: merge_tag_sets(&[], &feature.tags),
        keyword: feature.keyword.trim().to_owned(),
        name: feature.name.clone(),
        description: feature.description.clone(),
    };

    let mut scenarios = collect_scenarios(&feature);
    if let Some(line) = options.line {
        scenarios.retain(|scenario| scenario.line == line);
        if scenarios.is_empty() {
            return Err(SplitError::LineNotFound {
                feature: feature_stem.to_owned(),
                line,
            });
        }
    }
    scenarios.retain(|scenario| {
        let effective = merge_tag_sets(&header.tags, &scenario.tags);
        let excluded = is_excluded(&effective, &options.exclude_tags);
        if excluded {
            debug!(feature = feature_stem, scenario = %scenario.name, "skipping excluded scenario");
        }
        !excluded
    });

    let mut generated = Vec::new();
    for (index, scenario) in scenarios.iter().enumerate() {
        let content = write_feature(&header, scenario);
        for run in 1..=options.number_of_test_runs {
            generated.push(GeneratedFeature {
                name: generated_feature_name(feature_stem, index + 1, run),
                content: content.clone(),
            });
        }
    }
    Ok(generated)
}

fn collect_scenarios(feature: &gherkin::Feature) -> Vec<ConcreteScenario> {
    let background = background_steps(feature.background.as_ref());
    let mut scenarios: Vec<ConcreteScenario> = feature
        .scenarios
        .iter()
        .flat_map(|scenario| expand_scenario(scenario, &background, &[]))
        .collect();

    for rule in &feature.rules {
        let mut rule_background = background.clone();
        rule_background.extend(background_steps(rule.background.as_ref()));
        let rule_tags = merge_tag_sets(&[], &rule.tags);
        scenarios.extend(
            rule.scenarios
                .iter()
                .flat_map(|scenario| expand_scenario(scenario, &rule_background, &rule_tags)),
        );
    }

    scenarios.sort_by_key(|scenario| scenario.line);
    scenarios
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<ConcreteStep> {
    background
        .map(|bg| bg.steps.iter().map(ConcreteStep::from).collect())
        .unwrap_or_default()
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;

    const TWO_SCENARIOS: &str = "Feature: Login\n\
\n\
\x20 Scenario: good password\n\
\x20   Given a user\n\
\n\
\x20 @wip\n\
\x20 Scenario: bad password\n\
\x20   Given a user";

    #[test]
    fn names_each_scenario_and_run() {
        let options = SplitOptions::default().with_number_of_test_runs(2);
        let generated = split_feature("Login", TWO_SCENARIOS, &options).expect("split");
        let names: Vec<&str> = generated.iter().map(GeneratedFeature::name).collect();
        assert_eq!(
            names,
            [
                "Login_scenario001_run001_IT",
                "Login_scenario001_run002_IT",
                "Login_scenario002_run001_IT",
                "Login_scenario002_run002_IT",
            ]
        );
    }

    #[test]
    fn excluded_scenarios_are_skipped_before_numbering() {
        let options = SplitOptions::default().with_exclude_tags(vec!["@wip".to_owned()]);
        let generated = split_feature("Login", TWO_SCENARIOS, &options).expect("split");
        assert_eq!(generated.len(), 1);
        let only = generated.first().expect("one feature");
        assert_eq!(only.name(), "Login_scenario001_run001_IT");
        assert!(only.content().contains("Scenario: good password"));
    }

    #[test]
    fn unknown_line_is_reported() {
        let options = SplitOptions::default().with_line(Some(999));
        let err = split_feature("Login", TWO_SCENARIOS, &options).expect_err("no scenario");
        assert!(matches!(err, SplitError::LineNotFound { line: 999, .. }));
    }

    #[test]
    fn invalid_gherkin_is_a_parse_error() {
        let err = split_feature("Broken", "this is not gherkin\n", &SplitOptions::default())
            .expect_err("parse error");
        assert!(matches!(err, SplitError::Parse { .. }));
    }
}
