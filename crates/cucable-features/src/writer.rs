//! Serialises a single-scenario feature back to Gherkin text.

use crate::scenario::{ConcreteScenario, ConcreteStep};

const INDENT: &str = "  ";

/// Header data shared by every feature generated from one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FeatureHeader {
    pub tags: Vec<String>,
    pub keyword: String,
    pub name: String,
    pub description: Option<String>,
}

/// Writes a feature containing `scenario` and its background.
pub(crate) fn write_feature(header: &FeatureHeader, scenario: &ConcreteScenario) -> String {
    let mut out = String::new();
    if !header.tags.is_empty() {
        push_line(&mut out, 0, &header.tags.join(" "));
    }
    push_line(&mut out, 0, &format!("{}: {}", header.keyword, header.name));
    push_description(&mut out, header.description.as_deref(), 1);

    if !scenario.background.is_empty() {
        out.push('\n');
        push_line(&mut out, 1, "Background:");
        push_steps(&mut out, &scenario.background);
    }

    out.push('\n');
    if !scenario.tags.is_empty() {
        push_line(&mut out, 1, &scenario.tags.join(" "));
    }
    push_line(
        &mut out,
        1,
        &format!("{}: {}", scenario.keyword, scenario.name),
    );
    push_description(&mut out, scenario.description.as_deref(), 2);
    push_steps(&mut out, &scenario.steps);
    out
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

fn push_description(out: &mut String, description: Option<&str>, depth: usize) {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return;
    };
    for line in description.lines() {
        push_line(out, depth, line.trim());
    }
}

fn push_steps(out: &mut String, steps: &[ConcreteStep]) {
    for step in steps {
        push_line(out, 2, &format!("{} {}", step.keyword, step.text));
        if let Some(table) = &step.table {
            for row in table {
                push_line(out, 3, &table_row(row));
            }
        }
        if let Some(docstring) = &step.docstring {
            push_line(out, 3, "\"\"\"");
            for line in docstring.lines() {
                push_line(out, 3, line);
            }
            push_line(out, 3, "\"\"\"");
        }
    }
}

fn table_row(cells: &[String]) -> String {
    let mut row = String::from("|");
    for cell in cells {
        let escaped = cell.replace('\\', "\\\\").replace('|', "\\|");
        row.push_str(&format!(" {escaped} |"));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> FeatureHeader {
        FeatureHeader {
            tags: vec!["@billing".to_owned()],
            keyword: "Feature".to_owned(),
            name: "Invoices".to_owned(),
            description: Some("  As a customer\n  I want invoices\n".to_owned()),
        }
    }

    fn step(keyword: &str, text: &str) -> ConcreteStep {
        ConcreteStep {
            keyword: keyword.to_owned(),
            text: text.to_owned(),
            docstring: None,
            table: None,
        }
    }

    #[test]
    fn writes_header_background_and_scenario() {
        let scenario = ConcreteScenario {
            keyword: "Scenario".to_owned(),
            name: "Pay".to_owned(),
            description: None,
            line: 7,
            tags: vec!["@smoke".to_owned()],
            background: vec![step("Given", "a customer")],
            steps: vec![
                ConcreteStep {
                    table: Some(vec![vec!["a|b".to_owned(), "c".to_owned()]]),
                    ..step("When", "they pay")
                },
                ConcreteStep {
                    docstring: Some("line one\nline two".to_owned()),
                    ..step("Then", "a receipt is shown")
                },
            ],
        };

        let expected = "@billing\n\
Feature: Invoices\n\
\x20 As a customer\n\
\x20 I want invoices\n\
\n\
\x20 Background:\n\
\x20   Given a customer\n\
\n\
\x20 @smoke\n\
\x20 Scenario: Pay\n\
\x20   When they pay\n\
\x20     | a\\|b | c |\n\
\x20   Then a receipt is shown\n\
\x20     \"\"\"\n\
\x20     line one\n\
\x20     line two\n\
\x20     \"\"\"\n";
        assert_eq!(write_feature(&header(), &scenario), expected);
    }
}
