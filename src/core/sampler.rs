//! The sampling loop
//!
//! Prints the header once, then alternates between taking a sample and
//! waiting for the interval. The loop ends when the process has no data left
//! or when an interrupt arrives; any other failure is returned to the caller.

use crate::config::SamplerConfig;
use crate::error::{ProcmetError, Result};
use crate::monitor::{Aggregator, MetricSource};
use crate::output::Formatter;
use log::{debug, info, warn};
use std::cell::Cell;
use std::error::Error;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No source could see the process any more
    ProcessExited,
    /// The user asked to stop
    Interrupted,
}

/// Result of a sampling session
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    /// Number of data rows written, header excluded
    pub rows: usize,
    /// Total time spent in the loop
    pub duration: Duration,
    pub stop: StopReason,
}

/// Sending half of the interrupt channel
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        // The receiving side may already be gone, which is fine
        let _ = self.tx.send(());
    }
}

/// Receiving half of the interrupt channel, owned by the loop
#[derive(Debug)]
pub struct Shutdown {
    rx: Receiver<()>,
    requested: Cell<bool>,
}

impl Shutdown {
    pub fn channel() -> (ShutdownHandle, Shutdown) {
        let (tx, rx) = mpsc::channel();
        let shutdown = Shutdown {
            rx,
            requested: Cell::new(false),
        };
        (ShutdownHandle { tx }, shutdown)
    }

    /// Route Ctrl-C to a new channel
    pub fn install_ctrlc() -> Result<Shutdown> {
        let (handle, shutdown) = Self::channel();
        ctrlc::set_handler(move || handle.request())?;
        Ok(shutdown)
    }

    pub fn is_requested(&self) -> bool {
        if !self.requested.get() && self.rx.try_recv().is_ok() {
            self.requested.set(true);
        }
        self.requested.get()
    }

    /// Block for `timeout` or until an interrupt arrives; true on interrupt
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_requested() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                self.requested.set(true);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can interrupt us any more, plain sleep
                thread::sleep(timeout);
                false
            }
        }
    }
}

/// Drives one target process from header to termination
pub struct Sampler {
    config: SamplerConfig,
    aggregator: Aggregator,
    formatter: Formatter,
}

impl Sampler {
    pub fn new(config: SamplerConfig, sources: Vec<Box<dyn MetricSource>>) -> Self {
        let aggregator = Aggregator::new(sources);
        let available = aggregator.available_names();

        let names: Vec<String> = if config.metrics.is_empty() {
            available.iter().map(|name| name.to_string()).collect()
        } else {
            for name in &config.metrics {
                if !available.contains(&name.as_str()) {
                    warn!("unknown metric {:?}, it will always render as a placeholder", name);
                }
            }
            config.metrics.clone()
        };

        let formatter =
            Formatter::new(names, config.delimiter.clone(), config.dt_format.clone());
        Self {
            config,
            aggregator,
            formatter,
        }
    }

    /// Column names in output order
    pub fn metric_names(&self) -> &[String] {
        self.formatter.names()
    }

    /// Run until the process disappears or `shutdown` fires
    pub fn run<W: Write>(&self, out: &mut W, shutdown: &Shutdown) -> Result<SamplingResult> {
        let start = Instant::now();
        let mut rows = 0;
        let finish = |rows: usize, stop: StopReason| -> Result<SamplingResult> {
            info!("stopped after {} rows: {:?}", rows, stop);
            Ok(SamplingResult {
                rows,
                duration: start.elapsed(),
                stop,
            })
        };

        info!(
            "sampling pid {} every {:?}",
            self.config.pid, self.config.interval
        );
        self.formatter.print_header(out)?;

        loop {
            if shutdown.is_requested() {
                return finish(rows, StopReason::Interrupted);
            }

            let sample = self
                .aggregator
                .collect(self.formatter.names(), self.config.pid)?;
            let Some(sample) = sample else {
                debug!("pid {} reported no data", self.config.pid);
                return finish(rows, StopReason::ProcessExited);
            };

            self.formatter.print_metrics(out, &sample)?;
            rows += 1;

            if shutdown.wait(self.config.interval) {
                return finish(rows, StopReason::Interrupted);
            }
        }
    }
}

/// Map the outcome of [`Sampler::run`] to a process exit code
///
/// Both stop reasons are a success. A failure is written to `err` as one
/// line, or with `debug` as its debug form followed by every source in the
/// chain; the exit code is 1 either way.
pub fn exit_code<W: Write>(result: &Result<SamplingResult>, debug: bool, err: &mut W) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            // Nothing sensible is left to do if stderr itself is broken
            let _ = report_failure(e, debug, err);
            1
        }
    }
}

fn report_failure<W: Write>(e: &ProcmetError, debug: bool, err: &mut W) -> std::io::Result<()> {
    if !debug {
        return writeln!(err, "error: {e}");
    }
    writeln!(err, "error: {e:?}")?;
    let mut source = e.source();
    while let Some(cause) = source {
        writeln!(err, "  caused by: {cause}")?;
        source = cause.source();
    }
    Ok(())
}
