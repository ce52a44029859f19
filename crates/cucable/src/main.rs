//! Command line entry point for Cucable.

use std::process;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::{Result, WrapErr};
use tracing::{error, info};

use cucable::config::{LogLevel, Settings};
use cucable::error::ConfigError;
use cucable::logging::init_logging;
use cucable::{GenerationReport, generate};
use cucable_features::SourceFeatures;

/// Splits Gherkin features per scenario and generates a runner for each.
#[derive(Parser, Debug)]
#[command(name = "cucable", version, about)]
struct Args {
    /// Runner template file.
    #[arg(long)]
    source_runner_template_file: Option<String>,
    /// Directory receiving the generated runners.
    #[arg(long)]
    generated_runner_directory: Option<Utf8PathBuf>,
    /// Feature file or directory, optionally suffixed with `:<line>`.
    #[arg(long)]
    source_features: Option<String>,
    /// Directory receiving the generated feature files.
    #[arg(long)]
    generated_feature_directory: Option<Utf8PathBuf>,
    /// How often each scenario is generated.
    #[arg(long, default_value_t = 1)]
    number_of_test_runs: u32,
    /// Comma-separated tags whose scenarios are skipped.
    #[arg(long, value_delimiter = ',')]
    exclude_scenario_tags: Vec<String>,
    /// Fixed number of runners to spread features over (0: one per feature).
    #[arg(long, default_value_t = 0)]
    desired_number_of_runners: usize,
    /// Extension of the generated runner files.
    #[arg(long, default_value = "java")]
    runner_extension: String,
    /// Fail instead of warning when the template is malformed.
    #[arg(long)]
    strict: bool,
    /// Keep `package` declarations of class templates.
    #[arg(long)]
    keep_package_declarations: bool,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args = Args::parse();

    let settings = match build_settings(args) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&Settings::default());
            error!(error = %e, "invalid configuration");
            process::exit(2);
        }
    };
    init_logging(&settings);

    info!(version = env!("CARGO_PKG_VERSION"), "starting cucable");
    settings.log_properties();

    match run(&settings) {
        Ok(report) => info!(
            features = report.feature_files.len(),
            runners = report.runners.len(),
            "cucable finished"
        ),
        Err(e) => {
            error!(error = ?e, "generation failed");
            process::exit(1);
        }
    }
}

fn build_settings(args: Args) -> Result<Settings, ConfigError> {
    let base = Settings::from_env()?.apply_overrides(args.log_level);
    let settings = Settings {
        source_runner_template_file: args.source_runner_template_file.unwrap_or_default(),
        generated_runner_directory: args.generated_runner_directory.unwrap_or_default(),
        source_features: SourceFeatures::parse(&args.source_features.unwrap_or_default()),
        generated_feature_directory: args.generated_feature_directory.unwrap_or_default(),
        number_of_test_runs: args.number_of_test_runs,
        exclude_scenario_tags: args.exclude_scenario_tags,
        desired_number_of_runners: args.desired_number_of_runners,
        runner_extension: args.runner_extension,
        strict: args.strict,
        keep_package_declarations: args.keep_package_declarations,
        ..base
    };
    settings.validate()?;
    Ok(settings)
}

fn run(settings: &Settings) -> Result<GenerationReport> {
    generate(settings).wrap_err_with(|| {
        format!(
            "failed to generate runners from {}",
            settings.source_features.path()
        )
    })
}
