/*!
 * Monitor process lifetime
 *
 * Starts every loop as its own task, waits for the shutdown signal, then
 * waits for every loop to observe it and exit.
 */

use std::future::Future;
use std::io;
use std::sync::Arc;

use linkwatch_core_signals::{Coordination, ShutdownSignal};
use linkwatch_sentinel::{
    MonitorStats, Prober, Sentinel, StatsSnapshot, TraceLog, TraceMode, TraceWorker,
};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::console::{run_exit_reader, ExitReason};
use crate::error::{LinkwatchError, Result};

/// Run a monitor session until the user exits.
///
/// `input` and `output` are the console; production passes stdin/stdout.
/// Returns the session statistics once every loop has stopped.
pub async fn run_monitor<R, W>(
    config: &MonitorConfig,
    prober: Arc<dyn Prober>,
    input: R,
    output: W,
) -> Result<StatsSnapshot>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let hosts = config.validate()?;
    let coordination = Coordination::new();
    let stats = Arc::new(MonitorStats::new());
    let trace_log = Arc::new(TraceLog::new(&config.trace_log));

    let sentinel = Sentinel::new(
        prober.clone(),
        hosts,
        &config.policy,
        coordination.clone(),
        stats.clone(),
    )?;

    let tracker = TaskTracker::new();
    let mut loops: Vec<(&'static str, JoinHandle<()>)> = Vec::new();

    loops.push((
        "connection sentinel",
        tracker.spawn(async move { sentinel.run().await }),
    ));

    for (name, mode) in [("quick trace", TraceMode::Quick), ("full trace", TraceMode::Full)] {
        let worker = TraceWorker::new(
            mode,
            config.trace_target.clone(),
            prober.clone(),
            coordination.clone(),
            trace_log.clone(),
            stats.clone(),
        );
        loops.push((name, tracker.spawn(async move { worker.run().await })));
    }

    let shutdown = coordination.shutdown().clone();
    loops.push((
        "user input detector",
        tracker.spawn(async move {
            match run_exit_reader(input, output, &shutdown).await {
                Ok(ExitReason::Command) => debug!("user exit requested"),
                Ok(reason) => debug!(?reason, "exit reader stopped"),
                Err(e) => {
                    warn!("console failed, shutting down: {}", e);
                    shutdown.request();
                }
            }
        }),
    ));

    let shutdown = coordination.shutdown().clone();
    loops.push((
        "interrupt watcher",
        tracker.spawn(async move { watch_interrupts(tokio::signal::ctrl_c(), &shutdown).await }),
    ));
    tracker.close();

    info!("program start");
    coordination.shutdown_requested().await;
    debug!("shutdown requested, waiting for loops to exit");
    tracker.wait().await;

    let mut failed = Vec::new();
    for (name, handle) in loops {
        if let Err(e) = handle.await {
            error!(task = name, "loop failed: {}", e);
            failed.push(name);
        }
    }

    let snapshot = stats.snapshot();
    info!("{}", snapshot.summary());

    if !failed.is_empty() {
        return Err(LinkwatchError::Runtime(format!(
            "loops failed: {}",
            failed.join(", ")
        )));
    }

    info!("exit successful");
    Ok(snapshot)
}

/// Raise `shutdown` when `interrupt` fires.
///
/// A failure to listen for interrupts only loses Ctrl-C handling; the
/// monitor keeps running until shutdown arrives some other way.
async fn watch_interrupts<F>(interrupt: F, shutdown: &ShutdownSignal)
where
    F: Future<Output = io::Result<()>>,
{
    tokio::select! {
        result = interrupt => match result {
            Ok(()) => {
                info!("interrupt received");
                shutdown.request();
            }
            Err(e) => {
                warn!("cannot listen for interrupts: {}", e);
                shutdown.requested().await;
            }
        },
        _ = shutdown.requested() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use std::time::Duration;

    #[tokio::test]
    async fn test_interrupt_raises_shutdown() {
        init_test_logging();
        let shutdown = ShutdownSignal::new();

        watch_interrupts(async { Ok(()) }, &shutdown).await;
        assert!(shutdown.is_requested());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_listener_failure_is_not_fatal() {
        init_test_logging();
        let shutdown = ShutdownSignal::new();

        let watcher = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                watch_interrupts(async { Err(io::Error::other("no signal handler")) }, &shutdown)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!shutdown.is_requested());
        assert!(!watcher.is_finished());

        shutdown.request();
        watcher.await.unwrap();
    }
}
