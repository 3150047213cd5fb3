//! Auto-clearing "trace now" signal
//!
//! Raised by the sentinel on a confirmed outage and cleared by a trace worker
//! once it has written its results. Several workers may observe the same
//! raise; the first one to clear it hides the request from any worker that
//! had not yet woken up.

use std::sync::Arc;
use tokio::sync::watch;

use crate::shutdown::ShutdownSignal;

/// Shared trace-request flag.
///
/// A [`watch`] channel carries the flag so waiters block on a change
/// notification instead of polling.
#[derive(Debug, Clone)]
pub struct TraceRequest {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for TraceRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceRequest {
    /// Create a new, cleared flag
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Raise the flag.
    ///
    /// Returns `false` if it was already raised.
    pub fn request(&self) -> bool {
        self.tx.send_if_modified(|set| {
            let changed = !*set;
            *set = true;
            changed
        })
    }

    /// Whether a trace is currently requested
    pub fn is_requested(&self) -> bool {
        *self.tx.borrow()
    }

    /// Clear the flag.
    ///
    /// Returns `true` if this call was the one that cleared it.
    pub fn consume(&self) -> bool {
        self.tx.send_if_modified(|set| {
            let was_set = *set;
            *set = false;
            was_set
        })
    }

    /// Block until the flag is raised or `shutdown` is requested.
    ///
    /// Returns `true` when a trace is requested, `false` when shutdown won.
    /// Shutdown is checked first, so a raised flag is ignored once the
    /// process is going down.
    pub async fn wait(&self, shutdown: &ShutdownSignal) -> bool {
        let mut rx = self.tx.subscribe();

        loop {
            if shutdown.is_requested() {
                return false;
            }
            if *rx.borrow_and_update() {
                return true;
            }

            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }
                _ = shutdown.requested() => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[test]
    fn test_request_and_consume() {
        let flag = TraceRequest::new();
        assert!(!flag.is_requested());

        assert!(flag.request());
        assert!(flag.is_requested());

        // Second raise is a no-op
        assert!(!flag.request());

        assert!(flag.consume());
        assert!(!flag.is_requested());

        // Only one consumer clears a given raise
        assert!(!flag.consume());
    }

    #[tokio::test]
    async fn test_wait_returns_when_already_raised() {
        let flag = TraceRequest::new();
        let shutdown = ShutdownSignal::new();
        flag.request();

        let woke = tokio::time::timeout(Duration::from_millis(100), flag.wait(&shutdown)).await;
        assert_eq!(woke, Ok(true));
    }

    #[tokio::test]
    async fn test_wait_wakes_on_request() {
        let flag = TraceRequest::new();
        let shutdown = ShutdownSignal::new();

        let waiter = {
            let flag = flag.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { flag.wait(&shutdown).await })
        };

        tokio::task::yield_now().await;
        flag.request();

        assert!(waiter.await.unwrap());
    }

    #[test]
    fn test_wait_ignores_raise_then_clear_while_parked() {
        let flag = TraceRequest::new();
        let shutdown = ShutdownSignal::new();

        let mut waiter = task::spawn(flag.wait(&shutdown));
        assert_pending!(waiter.poll());

        // Raised and cleared before the waiter runs again: it keeps waiting
        flag.request();
        flag.consume();
        assert!(waiter.is_woken());
        assert_pending!(waiter.poll());

        flag.request();
        assert_ready_eq!(waiter.poll(), true);
    }

    #[tokio::test]
    async fn test_wait_returns_false_on_shutdown() {
        let flag = TraceRequest::new();
        let shutdown = ShutdownSignal::new();

        let waiter = {
            let flag = flag.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { flag.wait(&shutdown).await })
        };

        tokio::task::yield_now().await;
        shutdown.request();

        assert!(!waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_shutdown_takes_priority_over_raised_flag() {
        let flag = TraceRequest::new();
        let shutdown = ShutdownSignal::new();
        flag.request();
        shutdown.request();

        assert!(!flag.wait(&shutdown).await);
    }
}
