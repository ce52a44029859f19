//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so stdout stays free for callers piping the
//! binary's output.

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

fn filter_from_settings(settings: &Settings) -> EnvFilter {
    EnvFilter::new(settings.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on the settings.
///
/// # Environment Variables
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level` (parsed into `settings.log_level`)
/// 2. `CUCABLE_LOG_LEVEL` (parsed into `settings.log_level`)
/// 3. Default configuration value
///
/// # Note
///
/// If a global subscriber is already set, this function silently ignores
/// the error. The first subscriber wins.
pub fn init_logging(settings: &Settings) {
    let filter = filter_from_settings(settings);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
