//! Scripted probe facility
//!
//! Lets the sentinel and trace workers run against canned results instead of
//! the network. Each host gets a queue of outcomes; once a queue is drained
//! the prober falls back to its default outcome.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::probe::{Prober, TraceMode};

#[derive(Debug, Default)]
struct Script {
    outcomes: HashMap<String, VecDeque<bool>>,
    probed: Vec<String>,
    traces: Vec<(String, TraceMode)>,
    trace_delays: HashMap<TraceMode, Duration>,
}

/// [`Prober`] that replays scripted outcomes and records every call.
#[derive(Debug)]
pub struct ScriptedProber {
    default_outcome: AtomicBool,
    trace_output: Vec<String>,
    script: Mutex<Script>,
}

impl ScriptedProber {
    /// Every unscripted probe returns `default_outcome`
    pub fn new(default_outcome: bool) -> Self {
        Self {
            default_outcome: AtomicBool::new(default_outcome),
            trace_output: vec!["1  192.0.2.1  1 ms".to_string()],
            script: Mutex::new(Script::default()),
        }
    }

    /// Lines returned by every trace
    pub fn with_trace_output<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trace_output = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Make traces in `mode` take `delay` (virtual time under a paused clock)
    pub fn with_trace_delay(self, mode: TraceMode, delay: Duration) -> Self {
        self.lock().trace_delays.insert(mode, delay);
        self
    }

    /// Queue outcomes for `host`, consumed one per probe
    pub fn script<I>(&self, host: &str, outcomes: I)
    where
        I: IntoIterator<Item = bool>,
    {
        self.lock()
            .outcomes
            .entry(host.to_string())
            .or_default()
            .extend(outcomes);
    }

    /// Change the outcome used once scripts run dry
    pub fn set_default(&self, outcome: bool) {
        self.default_outcome.store(outcome, Ordering::SeqCst);
    }

    /// Every probed host, in call order
    pub fn probed_hosts(&self) -> Vec<String> {
        self.lock().probed.clone()
    }

    pub fn probe_count(&self) -> usize {
        self.lock().probed.len()
    }

    /// Every trace request, in call order
    pub fn traces(&self) -> Vec<(String, TraceMode)> {
        self.lock().traces.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, address: &str) -> bool {
        let outcome = {
            let mut script = self.lock();
            script.probed.push(address.to_string());
            script
                .outcomes
                .get_mut(address)
                .and_then(VecDeque::pop_front)
        };

        // Yield so a tight probing loop cannot starve other tasks
        tokio::task::yield_now().await;

        outcome.unwrap_or_else(|| self.default_outcome.load(Ordering::SeqCst))
    }

    async fn trace_route(&self, address: &str, mode: TraceMode) -> Vec<String> {
        let delay = {
            let mut script = self.lock();
            script.traces.push((address.to_string(), mode));
            script.trace_delays.get(&mode).copied()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.trace_output.clone()
    }
}
