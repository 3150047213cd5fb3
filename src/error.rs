/*!
 * Error types for linkwatch
 */

use std::fmt;
use std::io;

use linkwatch_sentinel::SentinelError;

pub type Result<T> = std::result::Result<T, LinkwatchError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum LinkwatchError {
    /// Configuration error
    Config(String),

    /// I/O error
    Io(io::Error),

    /// Diagnostic logging could not be set up
    Logging(String),

    /// Async runtime could not be started or a task failed
    Runtime(String),

    /// Sentinel setup error
    Sentinel(SentinelError),
}

impl LinkwatchError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LinkwatchError::Config(_)
            | LinkwatchError::Runtime(_)
            | LinkwatchError::Sentinel(SentinelError::EmptyHostList)
            | LinkwatchError::Sentinel(SentinelError::BlankHost { .. })
            | LinkwatchError::Sentinel(SentinelError::InvalidPolicy(_)) => EXIT_FATAL,
            _ => EXIT_FAILURE,
        }
    }
}

impl fmt::Display for LinkwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkwatchError::Config(msg) => write!(f, "Configuration error: {}", msg),
            LinkwatchError::Io(err) => write!(f, "I/O error: {}", err),
            LinkwatchError::Logging(msg) => write!(f, "Logging error: {}", msg),
            LinkwatchError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            LinkwatchError::Sentinel(err) => write!(f, "Sentinel error: {}", err),
        }
    }
}

impl std::error::Error for LinkwatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkwatchError::Io(err) => Some(err),
            LinkwatchError::Sentinel(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LinkwatchError {
    fn from(err: io::Error) -> Self {
        LinkwatchError::Io(err)
    }
}

impl From<SentinelError> for LinkwatchError {
    fn from(err: SentinelError) -> Self {
        LinkwatchError::Sentinel(err)
    }
}
