//! Outage Classifier
//!
//! After a drop, probes every host once and rates the damage. A minority of
//! failures inside the short probe timeout is treated as noise.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::hosts::HostList;
use crate::probe::{probe_all, Prober};

/// Severity of a suspected outage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Spurious drop, or only a minority of hosts failed
    None,
    /// Fewer than half of the hosts answered
    Partial,
    /// No host answered
    Full,
}

impl Classification {
    /// Classify `successes` out of `total` probes.
    ///
    /// Exactly half succeeding is not an outage.
    pub fn from_counts(successes: usize, total: usize) -> Self {
        if successes >= total {
            Classification::None
        } else if successes == 0 {
            Classification::Full
        } else if successes * 2 < total {
            Classification::Partial
        } else {
            Classification::None
        }
    }

    pub fn is_outage(&self) -> bool {
        !matches!(self, Classification::None)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::None => write!(f, "no outage"),
            Classification::Partial => write!(f, "partial outage"),
            Classification::Full => write!(f, "full outage"),
        }
    }
}

pub struct OutageClassifier {
    prober: Arc<dyn Prober>,
    hosts: HostList,
}

impl OutageClassifier {
    pub fn new(prober: Arc<dyn Prober>, hosts: HostList) -> Self {
        Self { prober, hosts }
    }

    /// Probe every host once and classify the result
    pub async fn classify(&self) -> Classification {
        let total = self.hosts.len();
        let successes = probe_all(self.prober.as_ref(), &self.hosts).await;
        let classification = Classification::from_counts(successes, total);
        let failed = total - successes;

        match classification {
            Classification::Full => {
                println!("Outage occurred");
                warn!(failed, "Outage occurred");
            }
            Classification::Partial => {
                println!("{} hosts failed to be pinged", failed);
                warn!(failed, "{} hosts failed to be pinged", failed);
            }
            Classification::None => {
                debug!(successes, total, "drop was not an outage");
            }
        }

        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProber;

    #[test]
    fn test_from_counts_policy() {
        // All succeed
        assert_eq!(Classification::from_counts(5, 5), Classification::None);
        // None succeed
        assert_eq!(Classification::from_counts(0, 5), Classification::Full);
        // Minority succeed
        assert_eq!(Classification::from_counts(1, 5), Classification::Partial);
        assert_eq!(Classification::from_counts(2, 5), Classification::Partial);
        // Majority succeed
        assert_eq!(Classification::from_counts(3, 5), Classification::None);
        assert_eq!(Classification::from_counts(4, 5), Classification::None);
    }

    #[test]
    fn test_exactly_half_is_not_an_outage() {
        assert_eq!(Classification::from_counts(2, 4), Classification::None);
        assert_eq!(Classification::from_counts(3, 6), Classification::None);
        assert_eq!(Classification::from_counts(1, 2), Classification::None);
        // Just under half
        assert_eq!(Classification::from_counts(2, 6), Classification::Partial);
    }

    #[test]
    fn test_single_host() {
        assert_eq!(Classification::from_counts(1, 1), Classification::None);
        assert_eq!(Classification::from_counts(0, 1), Classification::Full);
    }

    #[test]
    fn test_exhaustive_small_lists() {
        for total in 1..=12 {
            for successes in 0..=total {
                let c = Classification::from_counts(successes, total);
                let expected = if successes == total {
                    Classification::None
                } else if successes == 0 {
                    Classification::Full
                } else if (successes as f64) < (total as f64) / 2.0 {
                    Classification::Partial
                } else {
                    Classification::None
                };
                assert_eq!(c, expected, "{} of {}", successes, total);
            }
        }
    }

    #[tokio::test]
    async fn test_classify_probes_every_host() {
        let hosts = HostList::new(["a", "b", "c", "d"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(true));
        prober.script("a", [false]);
        prober.script("b", [false]);

        let classifier = OutageClassifier::new(prober.clone(), hosts);
        assert_eq!(classifier.classify().await, Classification::None);
        assert_eq!(prober.probe_count(), 4);
    }

    #[tokio::test]
    async fn test_classify_full_outage() {
        let hosts = HostList::new(["a", "b", "c", "d", "e"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(false));

        let classifier = OutageClassifier::new(prober, hosts);
        assert_eq!(classifier.classify().await, Classification::Full);
    }
}
