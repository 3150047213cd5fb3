//! Drop Detector
//!
//! Walks the host list forever, one probe at a time, pausing between
//! successful probes. Returns on the first failed probe or when shutdown is
//! requested during a pause.

use std::sync::Arc;
use std::time::Duration;

use linkwatch_core_signals::Coordination;
use tracing::debug;

use crate::hosts::HostList;
use crate::probe::Prober;

pub struct DropDetector {
    prober: Arc<dyn Prober>,
    hosts: HostList,
    coordination: Coordination,
    interval: Duration,
}

impl DropDetector {
    pub fn new(
        prober: Arc<dyn Prober>,
        hosts: HostList,
        coordination: Coordination,
        interval: Duration,
    ) -> Self {
        Self {
            prober,
            hosts,
            coordination,
            interval,
        }
    }

    /// Probe hosts in order, wrapping around at the end of the list.
    ///
    /// Returns as soon as a probe fails. A shutdown during the inter-probe
    /// pause also returns, indistinguishably, so callers must re-check the
    /// shutdown signal afterwards.
    pub async fn detect_drop(&self) {
        loop {
            for host in self.hosts.iter() {
                if !self.prober.probe(host).await {
                    debug!(host, "packet dropped");
                    return;
                }

                debug!(host, "pinged successfully, waiting");
                if self.coordination.wait_up_to(self.interval).await {
                    debug!("drop detector is exiting on shutdown");
                    return;
                }
            }
        }
    }
}
