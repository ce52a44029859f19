//! Generation settings.
//!
//! Paths and generation options come from the command line. The log level can
//! also be set through the `CUCABLE_LOG_LEVEL` environment variable, with the
//! command line taking precedence.

use std::env;
use std::str::FromStr;

use camino::Utf8PathBuf;
use cucable_features::SourceFeatures;
use tracing::info;

use crate::error::ConfigError;

/// Environment variable read by [`Settings::from_env`].
pub const LOG_LEVEL_ENV: &str = "CUCABLE_LOG_LEVEL";

const DEFAULT_RUNNER_EXTENSION: &str = "java";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information, including every written file.
    Debug,
    /// Settings and the generation summary.
    #[default]
    Info,
    /// Malformed templates and other recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Everything a generation run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Runner template path.
    pub source_runner_template_file: String,
    /// Directory receiving the rendered runners.
    pub generated_runner_directory: Utf8PathBuf,
    /// Feature file or directory to split, with an optional scenario line.
    pub source_features: SourceFeatures,
    /// Directory receiving the generated feature files.
    pub generated_feature_directory: Utf8PathBuf,
    /// How often each scenario is emitted.
    pub number_of_test_runs: u32,
    /// Scenarios carrying any of these tags are skipped.
    pub exclude_scenario_tags: Vec<String>,
    /// Number of runners to distribute features over; `0` means one runner
    /// per generated feature.
    pub desired_number_of_runners: usize,
    /// File extension of the rendered runners, without the dot.
    pub runner_extension: String,
    /// Treat malformed templates as errors.
    pub strict: bool,
    /// Keep `package` declarations of class templates.
    pub keep_package_declarations: bool,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_runner_template_file: String::new(),
            generated_runner_directory: Utf8PathBuf::new(),
            source_features: SourceFeatures::parse(""),
            generated_feature_directory: Utf8PathBuf::new(),
            number_of_test_runs: 1,
            exclude_scenario_tags: Vec::new(),
            desired_number_of_runners: 0,
            runner_extension: DEFAULT_RUNNER_EXTENSION.to_owned(),
            strict: false,
            keep_package_declarations: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Load defaults, taking the log level from `CUCABLE_LOG_LEVEL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` if the variable holds an unknown
    /// level.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        Ok(Self {
            log_level,
            ..Self::default()
        })
    }

    /// Apply an optional log level override.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Check that the settings describe a runnable generation.
    ///
    /// Required properties are checked in order and the first missing one is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingProperty` naming the first empty
    /// property, `ConfigError::InvalidExcludeTag` for a tag without a leading
    /// `@`, and `ConfigError::ZeroTestRuns` when no run is requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_runner_template_file.trim().is_empty() {
            return Err(ConfigError::MissingProperty("<sourceRunnerTemplateFile>"));
        }
        if self.generated_runner_directory.as_str().trim().is_empty() {
            return Err(ConfigError::MissingProperty("<generatedRunnerDirectory>"));
        }
        if self.source_features.is_empty() {
            return Err(ConfigError::MissingProperty("<sourceFeatures>"));
        }
        if self.generated_feature_directory.as_str().trim().is_empty() {
            return Err(ConfigError::MissingProperty("<generatedFeatureDirectory>"));
        }
        if let Some(tag) = self
            .exclude_scenario_tags
            .iter()
            .find(|tag| !tag.starts_with('@'))
        {
            return Err(ConfigError::InvalidExcludeTag(tag.clone()));
        }
        if self.number_of_test_runs == 0 {
            return Err(ConfigError::ZeroTestRuns);
        }
        Ok(())
    }

    /// Log the effective settings at info level.
    pub fn log_properties(&self) {
        info!(path = %self.source_runner_template_file, "sourceRunnerTemplateFile");
        info!(path = %self.generated_runner_directory, "generatedRunnerDirectory");
        info!(
            path = %self.source_features.path(),
            line = ?self.source_features.line(),
            "sourceFeatures"
        );
        for tag in &self.exclude_scenario_tags {
            info!(tag = %tag, "excludeScenarioTag");
        }
        info!(path = %self.generated_feature_directory, "generatedFeatureDirectory");
        info!(runs = self.number_of_test_runs, "numberOfTestRuns");
        info!(runners = self.desired_number_of_runners, "desiredNumberOfRunners");
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn complete() -> Settings {
        Settings {
            source_runner_template_file: "runner.template".to_owned(),
            generated_runner_directory: Utf8PathBuf::from("target/runners"),
            source_features: SourceFeatures::parse("features"),
            generated_feature_directory: Utf8PathBuf::from("target/features"),
            ..Settings::default()
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] raw: &str, #[case] level: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().ok(), Some(level));
        assert_eq!(level.as_filter_str(), raw.to_lowercase().trim_end_matches("ing"));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let err = "loud".parse::<LogLevel>().expect_err("unknown level");
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.number_of_test_runs, 1);
        assert_eq!(settings.desired_number_of_runners, 0);
        assert_eq!(settings.runner_extension, "java");
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[test]
    fn lookup_reads_log_level() {
        let settings = Settings::from_lookup(|key| {
            (key == LOG_LEVEL_ENV).then(|| "debug".to_owned())
        })
        .expect("valid level");
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn lookup_rejects_bad_log_level() {
        let result = Settings::from_lookup(|_| Some("chatty".to_owned()));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = Settings::default().apply_overrides(Some(LogLevel::Error));
        assert_eq!(settings.log_level, LogLevel::Error);
        let settings = settings.apply_overrides(None);
        assert_eq!(settings.log_level, LogLevel::Error);
    }

    #[rstest]
    fn complete_settings_validate(complete: Settings) {
        assert_eq!(complete.validate(), Ok(()));
    }

    #[rstest]
    #[case::template(
        |s: &mut Settings| s.source_runner_template_file.clear(),
        "<sourceRunnerTemplateFile>"
    )]
    #[case::runner_dir(
        |s: &mut Settings| s.generated_runner_directory = Utf8PathBuf::new(),
        "<generatedRunnerDirectory>"
    )]
    #[case::features(
        |s: &mut Settings| s.source_features = SourceFeatures::parse(" "),
        "<sourceFeatures>"
    )]
    #[case::feature_dir(
        |s: &mut Settings| s.generated_feature_directory = Utf8PathBuf::new(),
        "<generatedFeatureDirectory>"
    )]
    fn reports_first_missing_property(
        complete: Settings,
        #[case] clear: fn(&mut Settings),
        #[case] property: &'static str,
    ) {
        let mut settings = complete;
        clear(&mut settings);
        assert_eq!(
            settings.validate(),
            Err(ConfigError::MissingProperty(property))
        );
    }

    #[test]
    fn missing_template_is_reported_before_other_properties() {
        assert_eq!(
            Settings::default().validate(),
            Err(ConfigError::MissingProperty("<sourceRunnerTemplateFile>"))
        );
    }

    #[rstest]
    fn exclude_tags_need_a_leading_at(complete: Settings) {
        let settings = Settings {
            exclude_scenario_tags: vec!["@ok".to_owned(), "wip".to_owned()],
            ..complete
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidExcludeTag("wip".to_owned()))
        );
    }

    #[rstest]
    fn zero_test_runs_are_rejected(complete: Settings) {
        let settings = Settings {
            number_of_test_runs: 0,
            ..complete
        };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroTestRuns));
    }
}
