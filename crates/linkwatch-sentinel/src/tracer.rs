//! Trace Workers
//!
//! Two workers (quick and full) wait on the same trace-request flag and race
//! to capture a route trace for the same outage. Each writes its result to
//! the shared trace log and then clears the flag.
//!
//! The race is deliberate. Whoever finishes first clears the request, so a
//! worker that had not yet woken for it never sees it. A worker writes
//! exactly once for each request it observed; there is no promise that both
//! workers write for every outage.

use std::sync::Arc;

use chrono::Local;
use linkwatch_core_signals::Coordination;
use tracing::{debug, error, info, instrument};

use crate::metrics::MonitorStats;
use crate::probe::{Prober, TraceMode};
use crate::trace_log::TraceLog;

pub struct TraceWorker {
    mode: TraceMode,
    target: String,
    prober: Arc<dyn Prober>,
    coordination: Coordination,
    log: Arc<TraceLog>,
    stats: Arc<MonitorStats>,
}

impl TraceWorker {
    pub fn new(
        mode: TraceMode,
        target: impl Into<String>,
        prober: Arc<dyn Prober>,
        coordination: Coordination,
        log: Arc<TraceLog>,
        stats: Arc<MonitorStats>,
    ) -> Self {
        Self {
            mode,
            target: target.into(),
            prober,
            coordination,
            log,
            stats,
        }
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    /// Serve trace requests until shutdown
    #[instrument(skip(self), fields(mode = %self.mode, target = %self.target))]
    pub async fn run(&self) {
        debug!("tracer waiting for requests");

        loop {
            if !self.coordination.wait_for_trace().await {
                debug!("tracer has seen it is time to exit");
                break;
            }

            if !self.trace_once().await {
                debug!("tracer abandoned a trace on shutdown");
                break;
            }
        }

        debug!("tracer is exiting");
    }

    /// Capture one trace and append it to the log.
    ///
    /// Returns `false` if shutdown interrupted the trace. A failed write is
    /// logged and still clears the request so the worker does not spin on it.
    async fn trace_once(&self) -> bool {
        let started = Local::now();
        info!("tracer starting");

        let lines = tokio::select! {
            lines = self.prober.trace_route(&self.target, self.mode) => lines,
            _ = self.coordination.shutdown_requested() => return false,
        };

        let header = TraceLog::header(self.mode, started);
        match self.log.append(&header, &lines).await {
            Ok(()) => {
                self.stats.record_trace(self.mode);
                info!(lines = lines.len(), "tracer complete");
            }
            Err(e) => {
                self.stats.record_trace_failure();
                error!(path = %self.log.path().display(), "failed to write trace: {}", e);
            }
        }

        if self.coordination.consume_trace_request() {
            debug!("tracer cleared the trace request");
        }
        true
    }
}
