//! Monitor Policy
//!
//! Timing knobs for probing and tracing.

use std::time::Duration;

use crate::error::{Result, SentinelError};

/// Monitor operational policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorPolicy {
    /// Timeout for a single reachability probe, in milliseconds
    ///
    /// **Default:** 2000
    pub probe_timeout_ms: u64,

    /// Pause between consecutive successful probes while watching for drops
    ///
    /// **Default:** 5000
    pub drop_probe_interval_ms: u64,

    /// Per-hop wait used by the quick route tracer, in milliseconds
    ///
    /// The full tracer leaves the per-hop wait at the system default.
    ///
    /// **Default:** 1000
    pub quick_hop_timeout_ms: u64,
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 2_000,
            drop_probe_interval_ms: 5_000,
            quick_hop_timeout_ms: 1_000,
        }
    }
}

impl MonitorPolicy {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn drop_probe_interval(&self) -> Duration {
        Duration::from_millis(self.drop_probe_interval_ms)
    }

    pub fn quick_hop_timeout(&self) -> Duration {
        Duration::from_millis(self.quick_hop_timeout_ms)
    }

    /// Validate the policy configuration
    pub fn validate(&self) -> Result<()> {
        if self.probe_timeout_ms == 0 {
            return Err(SentinelError::InvalidPolicy(
                "probe_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.drop_probe_interval_ms == 0 {
            return Err(SentinelError::InvalidPolicy(
                "drop_probe_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.quick_hop_timeout_ms == 0 {
            return Err(SentinelError::InvalidPolicy(
                "quick_hop_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = MonitorPolicy::default();

        assert_eq!(policy.probe_timeout(), Duration::from_secs(2));
        assert_eq!(policy.drop_probe_interval(), Duration::from_secs(5));
        assert_eq!(policy.quick_hop_timeout(), Duration::from_secs(1));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut policy = MonitorPolicy::default();

        policy.probe_timeout_ms = 0;
        assert!(policy.validate().is_err());
        policy.probe_timeout_ms = 2_000;

        policy.drop_probe_interval_ms = 0;
        assert!(policy.validate().is_err());
        policy.drop_probe_interval_ms = 5_000;

        policy.quick_hop_timeout_ms = 0;
        assert!(policy.validate().is_err());
    }
}
