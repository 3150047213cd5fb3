//! Linkwatch Sentinel: connection monitoring and outage tracing
//!
//! Watches a fixed list of hosts for dropped probes, decides whether a drop is
//! a real outage, and when it is, asks two racing trace workers to capture a
//! route trace while it waits for the connection to come back.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────── Sentinel ─────────────────────────────┐
//! │  DropDetector ──▶ OutageClassifier ──▶ RecoveryWaiter              │
//! │   (one host       (all hosts once,      (all hosts until           │
//! │    at a time)      none/partial/full)    every one answers)        │
//! └───────────────────────────────┬────────────────────────────────────┘
//!                                 │ request_trace()
//!                                 ▼
//!                     ┌──── Coordination ────┐
//!                     │ shutdown │ trace flag │
//!                     └──────────┬───────────┘
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!       TraceWorker (quick)             TraceWorker (full)
//!                └───────────┬───────────────────┘
//!                            ▼
//!                     TraceLog (locked append)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use linkwatch_core_signals::Coordination;
//! use linkwatch_sentinel::testing::ScriptedProber;
//! use linkwatch_sentinel::{HostList, MonitorPolicy, MonitorStats, Sentinel};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let hosts = HostList::new(["8.8.8.8", "1.1.1.1"])?;
//! let coordination = Coordination::new();
//! let stats = Arc::new(MonitorStats::new());
//!
//! let sentinel = Sentinel::new(
//!     Arc::new(ScriptedProber::new(true)),
//!     hosts,
//!     &MonitorPolicy::default(),
//!     coordination.clone(),
//!     stats,
//! )?;
//!
//! tokio::spawn(async move { sentinel.run().await });
//! coordination.request_shutdown();
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod daemon;
pub mod detector;
pub mod error;
pub mod hosts;
pub mod metrics;
pub mod policy;
pub mod probe;
pub mod recovery;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod trace_log;
pub mod tracer;

pub use classifier::{Classification, OutageClassifier};
pub use daemon::{Sentinel, SentinelState};
pub use detector::DropDetector;
pub use error::{Result, SentinelError};
pub use hosts::HostList;
pub use metrics::{MonitorStats, StatsSnapshot};
pub use policy::MonitorPolicy;
pub use probe::{probe_all, Prober, TraceMode};
pub use recovery::RecoveryWaiter;
pub use trace_log::TraceLog;
pub use tracer::TraceWorker;
