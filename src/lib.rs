/*!
 * Linkwatch - connection outage monitor
 *
 * Continuously probes a fixed set of hosts and, when an outage is
 * suspected:
 * - classifies it as partial or full from a probe of every host
 * - fires two racing route tracers (quick and full) into `traces.txt`
 * - waits for every host to answer again and logs the restoration
 *
 * The probing loops live in `linkwatch-sentinel`, the shared signals in
 * `linkwatch-core-signals`. This crate wires them to the operating system,
 * the console and the diagnostic log.
 */

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod probe;

// Re-export commonly used types
pub use config::{LogLevel, MonitorConfig};
pub use console::{run_exit_reader, ExitReason};
pub use error::{LinkwatchError, Result};
pub use monitor::run_monitor;
pub use probe::SystemProber;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
