/*!
 * System probe facility
 *
 * Shells out to the platform `ping` and `traceroute`/`tracert` commands.
 * Nothing here is fatal: a spawn error, non-zero exit or timeout is a failed
 * probe, and a broken trace is empty output.
 */

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use linkwatch_sentinel::{MonitorPolicy, Prober, TraceMode};
use tokio::process::Command;
use tracing::{debug, warn};

/// Extra time allowed beyond the ping timeout before the child is killed
const PROBE_GRACE: Duration = Duration::from_secs(1);

/// [`Prober`] backed by operating system commands
#[derive(Debug, Clone)]
pub struct SystemProber {
    probe_timeout: Duration,
    quick_hop_timeout: Duration,
}

impl SystemProber {
    pub fn new(policy: &MonitorPolicy) -> Self {
        Self {
            probe_timeout: policy.probe_timeout(),
            quick_hop_timeout: policy.quick_hop_timeout(),
        }
    }

    /// Arguments for a single ping with this prober's timeout
    fn ping_args(&self, address: &str) -> (&'static str, Vec<String>) {
        if cfg!(windows) {
            (
                "ping",
                vec![
                    "-n".to_string(),
                    "1".to_string(),
                    "-w".to_string(),
                    self.probe_timeout.as_millis().to_string(),
                    address.to_string(),
                ],
            )
        } else {
            // -W takes whole seconds
            let secs = self.probe_timeout.as_secs().max(1);
            (
                "ping",
                vec![
                    "-c".to_string(),
                    "1".to_string(),
                    "-W".to_string(),
                    secs.to_string(),
                    address.to_string(),
                ],
            )
        }
    }

    /// Arguments for a route trace in `mode`
    fn trace_args(&self, address: &str, mode: TraceMode) -> (&'static str, Vec<String>) {
        let mut args = Vec::new();
        let program = if cfg!(windows) {
            if mode == TraceMode::Quick {
                args.push("-d".to_string());
                args.push("-w".to_string());
                args.push(self.quick_hop_timeout.as_millis().to_string());
            }
            "tracert"
        } else {
            if mode == TraceMode::Quick {
                args.push("-n".to_string());
                args.push("-w".to_string());
                args.push(self.quick_hop_timeout.as_secs().max(1).to_string());
            }
            "traceroute"
        };
        args.push(address.to_string());
        (program, args)
    }
}

#[async_trait]
impl Prober for SystemProber {
    async fn probe(&self, address: &str) -> bool {
        let (program, args) = self.ping_args(address);
        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.probe_timeout + PROBE_GRACE, command.status()).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                debug!(address, "failed to run {}: {}", program, e);
                false
            }
            Err(_) => {
                debug!(address, "ping timed out");
                false
            }
        }
    }

    async fn trace_route(&self, address: &str, mode: TraceMode) -> Vec<String> {
        let (program, args) = self.trace_args(address, mode);
        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match command.output().await {
            Ok(output) => split_output(&output.stdout),
            Err(e) => {
                warn!(address, %mode, "failed to run {}: {}", program, e);
                Vec::new()
            }
        }
    }
}

/// Split raw command output into lines, decoding lossily
fn split_output(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}
