//! End-to-end generation against a temporary project layout.
#![expect(clippy::expect_used, reason = "tests assert generation success paths")]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use cucable::config::Settings;
use cucable::error::{ConfigError, CucableError};
use cucable::generate;
use cucable_features::SourceFeatures;
use cucable_runner::RenderError;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const TEMPLATE: &str = "package parallel;\n\
\n\
@CucumberOptions(\n\
\x20   features = {\"target/parallel/features/[CUCABLE:FEATURE].feature\"},\n\
\x20   plugin = {\"json:target/cucumber-report/[CUCABLE:RUNNER].json\"}\n\
)\n\
public class [CUCABLE:RUNNER] {\n\
}\n";

const LOGIN: &str = "Feature: Login\n\
\n\
\x20 Scenario: good password\n\
\x20   Given a user\n\
\n\
\x20 @wip\n\
\x20 Scenario: bad password\n\
\x20   Given a user\n";

const SEARCH: &str = "Feature: Search\n\
\n\
\x20 Scenario: by name\n\
\x20   When I search\n";

struct Project {
    _root: TempDir,
    base: Utf8PathBuf,
}

impl Project {
    fn settings(&self) -> Settings {
        Settings {
            source_runner_template_file: self.base.join("runner.template").into_string(),
            generated_runner_directory: self.base.join("out/runners"),
            source_features: SourceFeatures::parse(self.base.join("features").as_str()),
            generated_feature_directory: self.base.join("out/features"),
            ..Settings::default()
        }
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.base.join(relative)).expect("generated file")
    }

    fn listing(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.base.join(relative))
            .expect("output directory")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .into_string()
                    .expect("utf-8 name")
            })
            .collect();
        names.sort();
        names
    }
}

#[fixture]
fn project() -> Project {
    let root = tempfile::tempdir().expect("temp dir");
    let base = Utf8Path::from_path(root.path())
        .expect("utf-8 temp dir")
        .to_owned();
    fs::create_dir_all(base.join("features/nested")).expect("features dir");
    fs::write(base.join("features/login.feature"), LOGIN).expect("login feature");
    fs::write(base.join("features/nested/search.feature"), SEARCH).expect("search feature");
    fs::write(base.join("runner.template"), TEMPLATE).expect("template");
    Project { _root: root, base }
}

#[rstest]
fn generates_one_runner_per_scenario(project: Project) {
    let report = generate(&project.settings()).expect("generation");

    assert_eq!(
        report.feature_files,
        [
            "login_scenario001_run001_IT",
            "login_scenario002_run001_IT",
            "search_scenario001_run001_IT",
        ]
    );
    assert_eq!(report.runners, report.feature_files);
    assert_eq!(
        project.listing("out/runners"),
        [
            "login_scenario001_run001_IT.java",
            "login_scenario002_run001_IT.java",
            "search_scenario001_run001_IT.java",
        ]
    );

    let runner = project.read("out/runners/search_scenario001_run001_IT.java");
    assert!(runner.contains("features/search_scenario001_run001_IT.feature\"}"));
    assert!(runner.contains("public class search_scenario001_run001_IT {"));
    assert!(runner.contains("// Generated by Cucable from "));

    let feature = project.read("out/features/login_scenario002_run001_IT.feature");
    assert!(feature.contains("Scenario: bad password"));
    assert!(!feature.contains("good password"));
}

#[rstest]
fn desired_runner_count_groups_features(project: Project) {
    let settings = Settings {
        desired_number_of_runners: 2,
        runner_extension: "kt".to_owned(),
        ..project.settings()
    };
    let report = generate(&settings).expect("generation");

    assert_eq!(
        report.runners,
        ["CucableMultiRunner_001", "CucableMultiRunner_002"]
    );
    let first = project.read("out/runners/CucableMultiRunner_001.kt");
    assert!(first.contains(
        "\"target/parallel/features/login_scenario001_run001_IT.feature\",\n\
         \"target/parallel/features/search_scenario001_run001_IT.feature\""
    ));
    assert!(first.contains("public class CucableMultiRunner_001 {"));
}

#[rstest]
fn exclude_tags_and_runs_shape_the_output(project: Project) {
    let settings = Settings {
        exclude_scenario_tags: vec!["@wip".to_owned()],
        number_of_test_runs: 2,
        ..project.settings()
    };
    let report = generate(&settings).expect("generation");
    assert_eq!(
        report.feature_files,
        [
            "login_scenario001_run001_IT",
            "login_scenario001_run002_IT",
            "search_scenario001_run001_IT",
            "search_scenario001_run002_IT",
        ]
    );
}

#[rstest]
fn stale_outputs_are_removed(project: Project) {
    fs::create_dir_all(project.base.join("out/runners")).expect("runner dir");
    fs::write(project.base.join("out/runners/Old_IT.java"), "old").expect("stale runner");
    fs::write(project.base.join("out/runners/keep.txt"), "keep").expect("other file");

    generate(&project.settings()).expect("generation");

    let listing = project.listing("out/runners");
    assert!(!listing.iter().any(|name| name == "Old_IT.java"));
    assert!(listing.iter().any(|name| name == "keep.txt"));
}

#[rstest]
fn single_file_with_line_selects_one_scenario(project: Project) {
    let source = format!("{}:3", project.base.join("features/login.feature"));
    let settings = Settings {
        source_features: SourceFeatures::parse(&source),
        ..project.settings()
    };
    let report = generate(&settings).expect("generation");
    assert_eq!(report.feature_files, ["login_scenario001_run001_IT"]);
    let feature = project.read("out/features/login_scenario001_run001_IT.feature");
    assert!(feature.contains("Scenario: good password"));
    assert!(!feature.contains("bad password"));
}

#[rstest]
fn missing_template_aborts_generation(project: Project) {
    fs::remove_file(project.base.join("runner.template")).expect("remove template");
    let err = generate(&project.settings()).expect_err("template is missing");
    assert!(matches!(
        err,
        CucableError::Render(RenderError::TemplateRead { .. })
    ));
}

#[rstest]
fn invalid_settings_are_rejected_before_writing(project: Project) {
    let settings = Settings {
        exclude_scenario_tags: vec!["wip".to_owned()],
        ..project.settings()
    };
    let err = generate(&settings).expect_err("invalid tag");
    assert!(matches!(
        err,
        CucableError::Config(ConfigError::InvalidExcludeTag(_))
    ));
    assert!(!project.base.join("out").exists());
}
