//! Smoke tests for the cucable binary.
#![expect(clippy::expect_used, reason = "tests assert command success paths")]

use std::fs;

use assert_cmd::Command;

const TEMPLATE: &str = "public class [CUCABLE:RUNNER] {\n\
\x20   String feature = \"[CUCABLE:FEATURE].feature\";\n\
}\n";

const FEATURE: &str = "Feature: Cart\n  Scenario: add\n    Given an item\n";

fn cucable() -> Command {
    let mut command = Command::cargo_bin("cucable").expect("binary exists");
    command.env_remove("CUCABLE_LOG_LEVEL");
    command
}

#[test]
fn generates_runners_for_a_feature_directory() {
    let root = tempfile::tempdir().expect("temp dir");
    let base = root.path();
    fs::create_dir_all(base.join("features")).expect("features dir");
    fs::write(base.join("features/cart.feature"), FEATURE).expect("feature");
    fs::write(base.join("runner.template"), TEMPLATE).expect("template");

    let output = cucable()
        .current_dir(base)
        .args([
            "--source-runner-template-file",
            "runner.template",
            "--generated-runner-directory",
            "out/runners",
            "--source-features",
            "features",
            "--generated-feature-directory",
            "out/features",
        ])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let runner = fs::read_to_string(base.join("out/runners/cart_scenario001_run001_IT.java"))
        .expect("runner written");
    assert!(runner.starts_with("public class cart_scenario001_run001_IT {"));
    assert!(runner.contains("\"cart_scenario001_run001_IT.feature\""));
    assert!(base.join("out/features/cart_scenario001_run001_IT.feature").exists());
}

#[test]
fn missing_property_exits_with_configuration_error() {
    let output = cucable()
        .args(["--generated-runner-directory", "out"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<sourceRunnerTemplateFile>"));
}

#[test]
fn invalid_log_level_in_environment_is_rejected() {
    let output = cucable()
        .env("CUCABLE_LOG_LEVEL", "chatty")
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_template_exits_with_generation_error() {
    let root = tempfile::tempdir().expect("temp dir");
    let base = root.path();
    fs::write(base.join("cart.feature"), FEATURE).expect("feature");

    let output = cucable()
        .current_dir(base)
        .args([
            "--source-runner-template-file",
            "missing.template",
            "--generated-runner-directory",
            "runners",
            "--source-features",
            "cart.feature",
            "--generated-feature-directory",
            "features",
        ])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
}
