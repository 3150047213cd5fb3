//! Probe facility contract
//!
//! The sentinel never pings or traces by itself. It calls into a [`Prober`],
//! which in production shells out to the operating system and in tests is a
//! scripted double.

use async_trait::async_trait;
use std::fmt;
use tracing::debug;

use crate::hosts::HostList;

/// Route trace flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceMode {
    /// Numeric output with a short per-hop wait. Fast enough to catch an
    /// outage while it is still happening.
    Quick,
    /// Name resolution and the system's default per-hop wait. More detail,
    /// often too slow to finish during a short outage.
    Full,
}

impl TraceMode {
    /// Label used in trace log headers
    pub fn label(&self) -> &'static str {
        match self {
            TraceMode::Quick => "Quick",
            TraceMode::Full => "Full",
        }
    }

    /// Whether this mode asks for the detailed trace
    pub fn is_detailed(&self) -> bool {
        matches!(self, TraceMode::Full)
    }
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceMode::Quick => write!(f, "quick"),
            TraceMode::Full => write!(f, "full"),
        }
    }
}

/// Reachability and route-trace facility.
///
/// Neither method fails: every problem (unreachable host, timeout, spawn
/// error) folds into a negative result.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Single reachability check, no retry. `false` on any failure.
    async fn probe(&self, address: &str) -> bool;

    /// Route trace towards `address`, returning captured output lines.
    ///
    /// May return partial or empty output.
    async fn trace_route(&self, address: &str, mode: TraceMode) -> Vec<String>;
}

/// Probe every host once, in order and without delay.
///
/// Returns the number of successful probes.
pub async fn probe_all(prober: &dyn Prober, hosts: &HostList) -> usize {
    let mut successes = 0;
    for host in hosts.iter() {
        if prober.probe(host).await {
            successes += 1;
        } else {
            debug!(host, "probe failed");
        }
    }
    successes
}
