//! Concrete scenarios extracted from a parsed feature.
//!
//! Scenario outlines are expanded here: each examples row becomes its own
//! scenario with `<column>` placeholders replaced by the row's values.

use crate::tags::merge_tag_sets;

const SCENARIO_KEYWORD: &str = "Scenario";

/// A step ready to be written back out as Gherkin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConcreteStep {
    pub keyword: String,
    pub text: String,
    pub docstring: Option<String>,
    pub table: Option<Vec<Vec<String>>>,
}

impl From<&gherkin::Step> for ConcreteStep {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            keyword: step.keyword.trim().to_owned(),
            text: step.value.clone(),
            docstring: step.docstring.clone(),
            table: step.table.as_ref().map(|t| t.rows.clone()),
        }
    }
}

impl ConcreteStep {
    fn substituted(&self, bindings: &[(&str, &str)]) -> Self {
        Self {
            keyword: self.keyword.clone(),
            text: substitute(&self.text, bindings),
            docstring: self.docstring.as_deref().map(|doc| substitute(doc, bindings)),
            table: self.table.as_ref().map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(|cell| substitute(cell, bindings)).collect())
                    .collect()
            }),
        }
    }
}

/// A single runnable scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConcreteScenario {
    pub keyword: String,
    pub name: String,
    pub description: Option<String>,
    /// One-based line of the scenario declaration in the source feature.
    pub line: usize,
    /// Rule, scenario and examples tags, normalised to `@tag`.
    pub tags: Vec<String>,
    pub background: Vec<ConcreteStep>,
    pub steps: Vec<ConcreteStep>,
}

/// Expands one parsed scenario into concrete scenarios.
///
/// `background` holds the steps every scenario inherits from its feature and
/// rule, and `inherited_tags` the tags of the enclosing rule. Outlines without
/// an examples table yield nothing.
pub(crate) fn expand_scenario(
    scenario: &gherkin::Scenario,
    background: &[ConcreteStep],
    inherited_tags: &[String],
) -> Vec<ConcreteScenario> {
    let steps: Vec<ConcreteStep> = scenario.steps.iter().map(ConcreteStep::from).collect();
    let tags = merge_tag_sets(inherited_tags, &scenario.tags);
    let base = ConcreteScenario {
        keyword: scenario.keyword.trim().to_owned(),
        name: scenario.name.clone(),
        description: scenario.description.clone(),
        line: scenario.position.line,
        tags,
        background: background.to_vec(),
        steps,
    };

    if scenario.examples.is_empty() {
        return vec![base];
    }

    let mut expanded = Vec::new();
    for examples in &scenario.examples {
        let Some(table) = examples.table.as_ref() else {
            continue;
        };
        let Some((header, rows)) = table.rows.split_first() else {
            continue;
        };
        let tags = merge_tag_sets(&base.tags, &examples.tags);
        for row in rows {
            let bindings: Vec<(&str, &str)> = header
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect();
            expanded.push(ConcreteScenario {
                keyword: SCENARIO_KEYWORD.to_owned(),
                name: substitute(&base.name, &bindings),
                tags: tags.clone(),
                steps: base
                    .steps
                    .iter()
                    .map(|step| step.substituted(&bindings))
                    .collect(),
                ..base.clone()
            });
        }
    }
    expanded
}

fn substitute(text: &str, bindings: &[(&str, &str)]) -> String {
    bindings
        .iter()
        .fold(text.to_owned(), |acc, (column, value)| {
            acc.replace(&format!("<{column}>"), value)
        })
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use gherkin::GherkinEnv;

    use super::*;

    fn parse(text: &str) -> gherkin::Feature {
        gherkin::Feature::parse(text, GherkinEnv::default()).expect("valid feature")
    }

    #[test]
    fn plain_scenario_is_kept_as_is() {
        let feature = parse("Feature: F\n  @a\n  Scenario: S\n    Given a step\n");
        let scenario = feature.scenarios.first().expect("scenario");
        let expanded = expand_scenario(scenario, &[], &[]);
        assert_eq!(expanded.len(), 1);
        let only = expanded.first().expect("one scenario");
        assert_eq!(only.name, "S");
        assert_eq!(only.tags, vec!["@a".to_owned()]);
        assert_eq!(only.steps.first().map(|s| s.keyword.as_str()), Some("Given"));
    }

    #[test]
    fn outline_rows_become_scenarios_with_values() {
        let feature = parse(
            "Feature: F\n\
             \n\
             \x20 Scenario Outline: eat <n>\n\
             \x20   Given I have <n> cukes\n\
             \x20     | count |\n\
             \x20     | <n>   |\n\
             \n\
             \x20   @fast\n\
             \x20   Examples:\n\
             \x20     | n |\n\
             \x20     | 1 |\n\
             \x20     | 2 |\n",
        );
        let scenario = feature.scenarios.first().expect("outline");
        let expanded = expand_scenario(scenario, &[], &[]);
        let names: Vec<&str> = expanded.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["eat 1", "eat 2"]);

        let second = expanded.get(1).expect("second row");
        assert_eq!(second.keyword, "Scenario");
        assert_eq!(second.tags, vec!["@fast".to_owned()]);
        let step = second.steps.first().expect("step");
        assert_eq!(step.text, "I have 2 cukes");
        assert_eq!(
            step.table,
            Some(vec![vec!["count".to_owned()], vec!["2".to_owned()]])
        );
    }
}
