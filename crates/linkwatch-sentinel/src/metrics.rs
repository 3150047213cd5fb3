//! Monitor Metrics
//!
//! Lock-free counters shared by the sentinel and both trace workers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::classifier::Classification;
use crate::probe::TraceMode;

/// Running counters for a monitor session
#[derive(Debug, Default)]
pub struct MonitorStats {
    drops: AtomicU64,
    spurious_drops: AtomicU64,
    partial_outages: AtomicU64,
    full_outages: AtomicU64,
    restorations: AtomicU64,
    quick_traces: AtomicU64,
    full_traces: AtomicU64,
    trace_failures: AtomicU64,
}

impl MonitorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drop reported by the drop detector
    pub fn record_drop(&self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of classifying a drop
    pub fn record_classification(&self, classification: Classification) {
        let counter = match classification {
            Classification::None => &self.spurious_drops,
            Classification::Partial => &self.partial_outages,
            Classification::Full => &self.full_outages,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_restoration(&self) {
        self.restorations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a trace written to the trace log
    pub fn record_trace(&self, mode: TraceMode) {
        let counter = match mode {
            TraceMode::Quick => &self.quick_traces,
            TraceMode::Full => &self.full_traces,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a trace that could not be written
    pub fn record_trace_failure(&self) {
        self.trace_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            drops: self.drops.load(Ordering::Relaxed),
            spurious_drops: self.spurious_drops.load(Ordering::Relaxed),
            partial_outages: self.partial_outages.load(Ordering::Relaxed),
            full_outages: self.full_outages.load(Ordering::Relaxed),
            restorations: self.restorations.load(Ordering::Relaxed),
            quick_traces: self.quick_traces.load(Ordering::Relaxed),
            full_traces: self.full_traces.load(Ordering::Relaxed),
            trace_failures: self.trace_failures.load(Ordering::Relaxed),
        }
    }
}

/// Copy of [`MonitorStats`] at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub drops: u64,
    pub spurious_drops: u64,
    pub partial_outages: u64,
    pub full_outages: u64,
    pub restorations: u64,
    pub quick_traces: u64,
    pub full_traces: u64,
    pub trace_failures: u64,
}

impl StatsSnapshot {
    pub fn outages(&self) -> u64 {
        self.partial_outages + self.full_outages
    }

    pub fn traces_written(&self) -> u64 {
        self.quick_traces + self.full_traces
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Drops: {} ({} spurious) | Outages: {} ({} partial, {} full) | Restored: {} | Traces: {} quick, {} full, {} failed",
            self.drops,
            self.spurious_drops,
            self.outages(),
            self.partial_outages,
            self.full_outages,
            self.restorations,
            self.quick_traces,
            self.full_traces,
            self.trace_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = MonitorStats::new();
        stats.record_drop();
        stats.record_drop();
        stats.record_classification(Classification::None);
        stats.record_classification(Classification::Full);
        stats.record_restoration();
        stats.record_trace(TraceMode::Quick);
        stats.record_trace_failure();

        let snap = stats.snapshot();
        assert_eq!(snap.drops, 2);
        assert_eq!(snap.spurious_drops, 1);
        assert_eq!(snap.outages(), 1);
        assert_eq!(snap.restorations, 1);
        assert_eq!(snap.traces_written(), 1);
        assert_eq!(snap.trace_failures, 1);
    }

    #[test]
    fn test_summary() {
        let snap = StatsSnapshot {
            drops: 4,
            spurious_drops: 2,
            partial_outages: 1,
            full_outages: 1,
            restorations: 2,
            quick_traces: 2,
            full_traces: 1,
            trace_failures: 0,
        };
        assert_eq!(
            snap.summary(),
            "Drops: 4 (2 spurious) | Outages: 2 (1 partial, 1 full) | Restored: 2 | Traces: 2 quick, 1 full, 0 failed"
        );
    }
}
