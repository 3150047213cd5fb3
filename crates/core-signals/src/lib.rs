//! Linkwatch Core Signals: shared coordination state for the monitor loops
//!
//! # Overview
//!
//! Every long-running loop in linkwatch (the sentinel, both trace workers and
//! the console reader) shares two binary signals:
//!
//! - **Shutdown**: starts cleared, is raised once and is never lowered
//!   again.
//! - **Trace requested**: raised by the sentinel when an outage is confirmed,
//!   cleared by whichever trace worker finishes writing first.
//!
//! Both are handed to components at construction through [`Coordination`],
//! a cheaply cloneable handle. Nothing here knows about probing or tracing.
//!
//! # Architecture
//!
//! ```text
//!   console / ctrl-c ──request_shutdown()──┐
//!                                          ▼
//!                               ┌────────────────────┐
//!   sentinel ──request_trace()─▶│    Coordination    │◀── wait_up_to()
//!                               │ shutdown │ trace   │◀── wait_for_trace()
//!   trace workers ─consume()───▶└────────────────────┘
//! ```
//!
//! Waits block on the signal itself rather than polling, so a shutdown wakes
//! every waiter immediately.
//!
//! # Usage Example
//!
//! ```
//! use linkwatch_core_signals::Coordination;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let coordination = Coordination::new();
//! let worker = coordination.clone();
//!
//! let handle = tokio::spawn(async move {
//!     // Returns false once shutdown wins the race
//!     worker.wait_for_trace().await
//! });
//!
//! coordination.request_shutdown();
//! assert!(!handle.await.unwrap());
//! assert!(coordination.wait_up_to(Duration::from_secs(5)).await);
//! # }
//! ```

pub mod coordination;
pub mod shutdown;
pub mod trace_request;

pub use coordination::Coordination;
pub use shutdown::ShutdownSignal;
pub use trace_request::TraceRequest;
