//! Sentinel error types

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SentinelError>;

/// Errors raised while setting up or running the sentinel.
///
/// Probe and trace failures are not errors: a failed probe is `false` and a
/// failed trace is empty output.
#[derive(Debug, Error)]
pub enum SentinelError {
    /// The monitor needs at least one host to probe
    #[error("host list must contain at least one address")]
    EmptyHostList,

    /// A host entry was blank
    #[error("host list entry {index} is blank")]
    BlankHost { index: usize },

    /// Policy validation failed
    #[error("invalid monitor policy: {0}")]
    InvalidPolicy(String),

    /// Appending to the trace log failed
    #[error("trace log write failed: {0}")]
    TraceLog(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SentinelError::BlankHost { index: 3 }.to_string(),
            "host list entry 3 is blank"
        );
        assert_eq!(
            SentinelError::InvalidPolicy("probe_timeout_ms must be greater than 0".into())
                .to_string(),
            "invalid monitor policy: probe_timeout_ms must be greater than 0"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: SentinelError = io::Error::other("disk full").into();
        assert!(matches!(err, SentinelError::TraceLog(_)));
    }
}
