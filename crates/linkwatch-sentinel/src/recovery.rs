//! Recovery Waiter
//!
//! Re-probes the whole host list back to back until every host answers.

use std::sync::Arc;

use linkwatch_core_signals::Coordination;
use tracing::{debug, warn};

use crate::hosts::HostList;
use crate::probe::{probe_all, Prober};

pub struct RecoveryWaiter {
    prober: Arc<dyn Prober>,
    hosts: HostList,
    coordination: Coordination,
}

impl RecoveryWaiter {
    pub fn new(prober: Arc<dyn Prober>, hosts: HostList, coordination: Coordination) -> Self {
        Self {
            prober,
            hosts,
            coordination,
        }
    }

    /// Probe all hosts until a full pass succeeds.
    ///
    /// Returns `true` once the connection is restored, `false` if shutdown is
    /// observed first. Shutdown is checked before every pass, so a shutdown
    /// raised mid-pass costs at most the rest of that pass. There is no pause between passes; probe latency is
    /// the only pacing.
    pub async fn wait_for_restoration(&self) -> bool {
        let total = self.hosts.len();
        let mut passes: u64 = 0;

        loop {
            if self.coordination.is_shutdown_requested() {
                debug!(passes, "recovery waiter is exiting on shutdown");
                return false;
            }

            let successes = probe_all(self.prober.as_ref(), &self.hosts).await;
            passes += 1;

            if successes == total {
                println!("Connection restored");
                warn!(passes, "Connection restored");
                return true;
            }

            debug!(successes, total, passes, "connection still down");
            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProber;

    #[tokio::test]
    async fn test_returns_true_after_all_succeed() {
        let hosts = HostList::new(["a", "b", "c"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(true));
        // Two failing passes, then restored
        for host in ["a", "b", "c"] {
            prober.script(host, [false, false]);
        }

        let waiter = RecoveryWaiter::new(prober.clone(), hosts, Coordination::new());
        assert!(waiter.wait_for_restoration().await);
        assert_eq!(prober.probe_count(), 9);
    }

    #[tokio::test]
    async fn test_partial_pass_is_not_restoration() {
        let hosts = HostList::new(["a", "b"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(true));
        prober.script("b", [false]);

        let waiter = RecoveryWaiter::new(prober.clone(), hosts, Coordination::new());
        assert!(waiter.wait_for_restoration().await);
        assert_eq!(prober.probed_hosts(), vec!["a", "b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_returns_false_without_probing_when_already_shut_down() {
        let hosts = HostList::new(["a", "b", "c", "d", "e"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(false));
        let coordination = Coordination::new();
        coordination.request_shutdown();

        let waiter = RecoveryWaiter::new(prober.clone(), hosts, coordination);
        assert!(!waiter.wait_for_restoration().await);
        assert_eq!(prober.probe_count(), 0);
    }

    #[tokio::test]
    async fn test_returns_false_within_one_pass_of_shutdown() {
        let hosts = HostList::new(["a", "b", "c", "d", "e"]).unwrap();
        let prober = Arc::new(ScriptedProber::new(false));
        let coordination = Coordination::new();

        let handle = {
            let waiter = RecoveryWaiter::new(prober.clone(), hosts, coordination.clone());
            tokio::spawn(async move { waiter.wait_for_restoration().await })
        };

        while prober.probe_count() < 7 {
            tokio::task::yield_now().await;
        }
        coordination.request_shutdown();
        let probes_at_shutdown = prober.probe_count();

        assert!(!handle.await.unwrap());
        // Finishes the pass in flight, never starts another
        assert!(prober.probe_count() <= 10);
        assert!(prober.probe_count() >= probes_at_shutdown);
    }
}
