//! Sampler configuration
//!
//! Built through [`SamplerConfigBuilder`] and validated once on `build()`;
//! read-only afterwards.

use crate::core::constants::{kernel, output, sampling};
use crate::error::{ProcmetError, Result};
use crate::monitor::Pid;
use chrono::format::{Item, StrftimeItems};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the sampling loop needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Target process
    pub pid: Pid,
    /// Pause between two samples
    pub interval: Duration,
    /// Requested metric names; empty selects every available metric
    pub metrics: Vec<String>,
    /// Output field separator
    pub delimiter: String,
    /// strftime pattern for the timestamp column
    pub dt_format: String,
    /// Report failures in full instead of one line
    pub debug: bool,
    /// Where the process information filesystem is mounted
    pub proc_root: PathBuf,
}

impl SamplerConfig {
    pub fn builder(pid: Pid) -> SamplerConfigBuilder {
        SamplerConfigBuilder::new(pid)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dt_format(&self.dt_format)?;
        if self.proc_root.as_os_str().is_empty() {
            return Err(ProcmetError::InvalidConfiguration(
                "proc root cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SamplerConfig`]
#[derive(Debug, Clone)]
pub struct SamplerConfigBuilder {
    pid: Pid,
    interval_secs: f64,
    metrics: Vec<String>,
    delimiter: String,
    dt_format: String,
    debug: bool,
    proc_root: PathBuf,
}

impl SamplerConfigBuilder {
    fn new(pid: Pid) -> Self {
        Self {
            pid,
            interval_secs: sampling::DEFAULT_INTERVAL_SECS,
            metrics: Vec::new(),
            delimiter: output::DEFAULT_DELIMITER.to_string(),
            dt_format: output::DEFAULT_DT_FORMAT.to_string(),
            debug: false,
            proc_root: PathBuf::from(kernel::DEFAULT_ROOT),
        }
    }

    /// Interval in (possibly fractional) seconds
    pub fn interval_secs(mut self, secs: f64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn metrics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.metrics = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn dt_format(mut self, dt_format: impl Into<String>) -> Self {
        self.dt_format = dt_format.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn proc_root(mut self, proc_root: impl Into<PathBuf>) -> Self {
        self.proc_root = proc_root.into();
        self
    }

    pub fn build(self) -> Result<SamplerConfig> {
        let interval = Duration::try_from_secs_f64(self.interval_secs).map_err(|_| {
            ProcmetError::InvalidConfiguration(format!(
                "interval must be a non-negative number of seconds, got {}",
                self.interval_secs
            ))
        })?;

        let config = SamplerConfig {
            pid: self.pid,
            interval,
            metrics: self.metrics,
            delimiter: self.delimiter,
            dt_format: self.dt_format,
            debug: self.debug,
            proc_root: self.proc_root,
        };
        config.validate()?;
        Ok(config)
    }
}

fn validate_dt_format(dt_format: &str) -> Result<()> {
    if StrftimeItems::new(dt_format).any(|item| matches!(item, Item::Error)) {
        return Err(ProcmetError::InvalidConfiguration(format!(
            "invalid timestamp format {dt_format:?}"
        )));
    }
    Ok(())
}
