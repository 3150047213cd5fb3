//! Sentinel Daemon: the monitoring loop
//!
//! ```text
//!   ┌────────────┐  drop   ┌─────────────┐  partial/full  ┌──────────────────┐
//!   │ Monitoring │────────▶│ Classifying │───────────────▶│ Tracing+Waiting  │
//!   └────────────┘         └─────────────┘  raise trace   └──────────────────┘
//!         ▲   ▲   no outage       │                               │
//!         │   └───────────────────┘                               │
//!         └──────────────────────── restored ─────────────────────┘
//!
//!   any state ── shutdown observed ──▶ Terminated
//! ```
//!
//! The sentinel raises the trace request but never clears it; the trace
//! workers own that.

use std::fmt;
use std::sync::Arc;

use linkwatch_core_signals::Coordination;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::classifier::{Classification, OutageClassifier};
use crate::detector::DropDetector;
use crate::error::Result;
use crate::hosts::HostList;
use crate::metrics::MonitorStats;
use crate::policy::MonitorPolicy;
use crate::probe::Prober;
use crate::recovery::RecoveryWaiter;

/// Where the sentinel is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelState {
    Monitoring,
    Classifying,
    TracingAndWaiting,
    Terminated,
}

impl fmt::Display for SentinelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentinelState::Monitoring => write!(f, "monitoring"),
            SentinelState::Classifying => write!(f, "classifying"),
            SentinelState::TracingAndWaiting => write!(f, "tracing and waiting"),
            SentinelState::Terminated => write!(f, "terminated"),
        }
    }
}

/// The connection sentinel
///
/// Drives drop detection, outage classification and recovery waiting, and
/// raises the trace request when an outage is confirmed.
pub struct Sentinel {
    detector: DropDetector,
    classifier: OutageClassifier,
    recovery: RecoveryWaiter,
    coordination: Coordination,
    stats: Arc<MonitorStats>,
    hosts: HostList,
    state: watch::Sender<SentinelState>,
}

impl Sentinel {
    /// Create a new Sentinel instance
    ///
    /// Fails if the policy does not validate.
    pub fn new(
        prober: Arc<dyn Prober>,
        hosts: HostList,
        policy: &MonitorPolicy,
        coordination: Coordination,
        stats: Arc<MonitorStats>,
    ) -> Result<Self> {
        policy.validate()?;

        let detector = DropDetector::new(
            prober.clone(),
            hosts.clone(),
            coordination.clone(),
            policy.drop_probe_interval(),
        );
        let classifier = OutageClassifier::new(prober.clone(), hosts.clone());
        let recovery = RecoveryWaiter::new(prober, hosts.clone(), coordination.clone());
        let (state, _) = watch::channel(SentinelState::Monitoring);

        Ok(Self {
            detector,
            classifier,
            recovery,
            coordination,
            stats,
            hosts,
            state,
        })
    }

    /// Observe state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<SentinelState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SentinelState {
        *self.state.borrow()
    }

    /// Main loop - runs until shutdown is requested
    pub async fn run(&self) {
        info!(hosts = %self.hosts, "Sentinel active");

        loop {
            self.enter(SentinelState::Monitoring);
            self.detector.detect_drop().await;
            if self.coordination.is_shutdown_requested() {
                break;
            }
            self.stats.record_drop();

            self.enter(SentinelState::Classifying);
            let classification = self.classifier.classify().await;
            self.stats.record_classification(classification);
            if self.coordination.is_shutdown_requested() {
                break;
            }

            if classification != Classification::None {
                self.enter(SentinelState::TracingAndWaiting);
                if !self.coordination.request_trace() {
                    debug!("trace request still pending from an earlier outage");
                }
                if self.recovery.wait_for_restoration().await {
                    self.stats.record_restoration();
                }
            }

            if self.coordination.is_shutdown_requested() {
                break;
            }
        }

        self.enter(SentinelState::Terminated);
        debug!("connection sentinel is exiting");
    }

    fn enter(&self, next: SentinelState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(from = %previous, to = %next, "sentinel state change");
        }
    }
}
