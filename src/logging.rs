/*!
 * Logging and tracing initialization
 */

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::MonitorConfig;
use crate::error::{LinkwatchError, Result};

/// Crates whose events reach the diagnostic log
const LOG_TARGETS: [&str; 3] = ["linkwatch", "linkwatch_sentinel", "linkwatch_core_signals"];

/// Build the default directive string for `level`
fn default_directives(level: tracing::Level) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize structured logging based on configuration.
///
/// `RUST_LOG` overrides the configured level. If the diagnostic file cannot
/// be opened the events go to stderr instead.
pub fn init_logging(config: &MonitorConfig) -> Result<()> {
    let level = config.log_level.to_tracing_level();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .map_err(|e| LinkwatchError::Logging(format!("Failed to create log filter: {}", e)))?;

    match config.log_file {
        Some(ref log_path) => match init_file_logging(log_path, env_filter) {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("Warning: {}; logging to stderr", e);
                let env_filter = EnvFilter::try_new(default_directives(level))
                    .map_err(|e| LinkwatchError::Logging(e.to_string()))?;
                init_stderr_logging(env_filter)
            }
        },
        None => init_stderr_logging(env_filter),
    }
}

/// Initialize logging to stderr, keeping stdout for the console prompt
fn init_stderr_logging(env_filter: EnvFilter) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LinkwatchError::Logging(e.to_string()))
}

/// Initialize logging to an appended file
fn init_file_logging(log_path: &Path, env_filter: EnvFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            LinkwatchError::Logging(format!(
                "Failed to open log file {}: {}",
                log_path.display(),
                e
            ))
        })?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_thread_names(true)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LinkwatchError::Logging(e.to_string()))
}

/// Initialize logging with custom format for testing
#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(tracing::Level::DEBUG)));

        let fmt_layer = fmt::layer().with_test_writer().with_target(false).compact();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .ok(); // Ignore error if already initialized
    });
}
