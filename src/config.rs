/*!
 * Configuration types for linkwatch
 *
 * Everything is compiled in: there is no config file, CLI flag or
 * environment lookup for the monitor settings.
 */

use std::path::PathBuf;
use std::time::Duration;

use linkwatch_sentinel::{HostList, MonitorPolicy};

use crate::error::{LinkwatchError, Result};

/// Hosts watched by default: Google DNS A, Cloudflare, Google DNS B,
/// youtube.com and ns1.telstra.net
pub const DEFAULT_HOSTS: [&str; 5] = [
    "8.8.8.8",
    "1.1.1.1",
    "8.8.4.4",
    "www.youtube.com",
    "139.130.4.5",
];

/// Address the route tracers target
pub const DEFAULT_TRACE_TARGET: &str = "8.8.8.8";

/// Main configuration for a monitor session
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Hosts to probe, in probe order
    pub hosts: Vec<String>,

    /// Address both trace workers trace towards
    pub trace_target: String,

    /// Append-only file receiving trace output
    pub trace_log: PathBuf,

    /// Diagnostic log file (None = stderr)
    pub log_file: Option<PathBuf>,

    /// Diagnostic log level
    pub log_level: LogLevel,

    /// How long runtime teardown waits for tasks stuck in blocking calls
    pub shutdown_grace: Duration,

    /// Probe and trace timing
    pub policy: MonitorPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect(),
            trace_target: DEFAULT_TRACE_TARGET.to_string(),
            trace_log: PathBuf::from("traces.txt"),
            log_file: Some(PathBuf::from("outages.log")),
            log_level: LogLevel::Info,
            shutdown_grace: Duration::from_secs(1),
            policy: MonitorPolicy::default(),
        }
    }
}

impl MonitorConfig {
    /// Validate the configuration and build the shared host list
    pub fn validate(&self) -> Result<HostList> {
        if self.trace_target.trim().is_empty() {
            return Err(LinkwatchError::Config(
                "trace target must not be empty".to_string(),
            ));
        }

        self.policy.validate()?;
        Ok(HostList::new(self.hosts.iter().cloned())?)
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        let hosts = config.validate().unwrap();

        assert_eq!(hosts.len(), 5);
        assert_eq!(hosts.as_slice()[3], "www.youtube.com");
        assert_eq!(config.trace_target, "8.8.8.8");
        assert_eq!(config.trace_log, PathBuf::from("traces.txt"));
        assert_eq!(config.log_file, Some(PathBuf::from("outages.log")));
    }

    #[test]
    fn test_empty_host_list_is_rejected() {
        let config = MonitorConfig {
            hosts: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LinkwatchError::Sentinel(_))
        ));
    }

    #[test]
    fn test_blank_trace_target_is_rejected() {
        let config = MonitorConfig {
            trace_target: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LinkwatchError::Config(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
