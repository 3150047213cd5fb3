//! Bundled coordination handle passed to every monitor component

use std::time::Duration;

use crate::shutdown::ShutdownSignal;
use crate::trace_request::TraceRequest;

/// Shared coordination state: the shutdown signal and the trace-request flag.
///
/// Cloning is cheap and every clone observes the same signals. Components
/// receive a clone at construction instead of reaching for globals.
#[derive(Debug, Clone, Default)]
pub struct Coordination {
    shutdown: ShutdownSignal,
    trace: TraceRequest,
}

impl Coordination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown.is_requested()
    }

    /// Suspend until shutdown is requested
    pub async fn shutdown_requested(&self) {
        self.shutdown.requested().await
    }

    /// Raise the trace-request flag
    pub fn request_trace(&self) -> bool {
        self.trace.request()
    }

    pub fn is_trace_requested(&self) -> bool {
        self.trace.is_requested()
    }

    /// Block until a trace is requested; `false` if shutdown came first
    pub async fn wait_for_trace(&self) -> bool {
        self.trace.wait(&self.shutdown).await
    }

    /// Clear the trace-request flag; `true` if this call cleared it
    pub fn consume_trace_request(&self) -> bool {
        self.trace.consume()
    }

    /// Wait up to `timeout`; `true` if shutdown was requested meanwhile
    pub async fn wait_up_to(&self, timeout: Duration) -> bool {
        self.shutdown.wait_up_to(timeout).await
    }

    /// The underlying shutdown signal
    pub fn shutdown(&self) -> &ShutdownSignal {
        &self.shutdown
    }
}
