//! Monotonic shutdown signal
//!
//! Backed by a [`CancellationToken`]: once cancelled it can never be reset,
//! which is exactly the lifecycle the monitor needs.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Process-wide shutdown request.
///
/// Clones share the same underlying token.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    /// Create a new, unraised signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Idempotent.
    pub fn request(&self) {
        if !self.token.is_cancelled() {
            debug!("shutdown requested");
        }
        self.token.cancel();
    }

    /// Whether shutdown has been requested
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Suspend until shutdown is requested
    pub async fn requested(&self) {
        self.token.cancelled().await
    }

    /// Wait for at most `timeout`.
    ///
    /// Returns `true` if shutdown was requested before or during the wait.
    /// A shutdown wakes the caller immediately rather than at the end of
    /// the timeout.
    pub async fn wait_up_to(&self, timeout: Duration) -> bool {
        if self.is_requested() {
            return true;
        }

        tokio::select! {
            _ = self.token.cancelled() => true,
            _ = tokio::time::sleep(timeout) => self.is_requested(),
        }
    }

    /// A child token that is cancelled together with this signal
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
