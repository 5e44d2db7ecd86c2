//! Average CPU utilization since process start
//!
//! Built from the cumulative tick counters in `/proc/<pid>/stat` and the
//! system uptime. The figure is an average over the whole process lifetime,
//! not the usage over the last sampling interval.

use super::metrics::{round2, MetricValue, Sample, CPU_PERCENT};
use super::{is_absence, pid_dir, MetricSource, Pid};
use crate::core::constants::kernel;
use crate::error::Result;
use log::debug;
use once_cell::sync::Lazy;
use procfs::process::Process;
use procfs::{FromRead, Uptime};
use std::path::{Path, PathBuf};

const NAMES: &[&str] = &[CPU_PERCENT];

/// Clock ticks per second, asked of the kernel once per run
pub static TICKS_PER_SECOND: Lazy<u64> =
    Lazy::new(|| ticks_or_fallback(procfs::ticks_per_second()));

fn ticks_or_fallback(ticks: u64) -> u64 {
    if ticks > 0 {
        ticks
    } else {
        kernel::FALLBACK_TICKS_PER_SECOND
    }
}

/// Tick counters read from the scheduling statistics line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CpuTimes {
    pub utime: u64,
    pub stime: u64,
    pub cutime: i64,
    pub cstime: i64,
    /// Start time in ticks since boot
    pub starttime: u64,
}

impl CpuTimes {
    pub fn total_ticks(&self) -> f64 {
        self.utime as f64 + self.stime as f64 + self.cutime as f64 + self.cstime as f64
    }
}

/// Percentage of one CPU used on average since the process started
///
/// A process whose elapsed time is zero or negative (just started, or the
/// uptime clock disagrees with the start time) reports 0.
pub fn cpu_percent(times: &CpuTimes, uptime_secs: f64, ticks_per_second: u64) -> f64 {
    let hz = ticks_per_second as f64;
    let elapsed = uptime_secs - times.starttime as f64 / hz;
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return 0.0;
    }
    round2(100.0 * (times.total_ticks() / hz) / elapsed)
}

pub struct CpuSource {
    proc_root: PathBuf,
    ticks_per_second: u64,
}

impl CpuSource {
    pub fn new(proc_root: &Path) -> Self {
        Self::with_ticks_per_second(proc_root, *TICKS_PER_SECOND)
    }

    pub fn with_ticks_per_second(proc_root: &Path, ticks_per_second: u64) -> Self {
        Self {
            proc_root: proc_root.to_path_buf(),
            ticks_per_second,
        }
    }

    fn read_times(&self, pid: Pid) -> procfs::ProcResult<CpuTimes> {
        let process = Process::new_with_root(pid_dir(&self.proc_root, pid))?;
        let stat = process.stat()?;
        Ok(CpuTimes {
            utime: stat.utime,
            stime: stat.stime,
            cutime: stat.cutime,
            cstime: stat.cstime,
            starttime: stat.starttime,
        })
    }

    fn read_uptime(&self) -> procfs::ProcResult<f64> {
        Ok(Uptime::from_file(self.proc_root.join("uptime"))?.uptime)
    }
}

impl MetricSource for CpuSource {
    fn label(&self) -> &'static str {
        "cpu"
    }

    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn sample(&self, pid: Pid) -> Result<Option<Sample>> {
        let readings = self
            .read_times(pid)
            .and_then(|times| Ok((times, self.read_uptime()?)));
        let (times, uptime) = match readings {
            Ok(readings) => readings,
            Err(err) if is_absence(&err) => {
                debug!("cpu data for pid {} unavailable: {}", pid, err);
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let mut sample = Sample::new();
        sample.insert(
            CPU_PERCENT,
            MetricValue::Percent(cpu_percent(&times, uptime, self.ticks_per_second)),
        );
        Ok(Some(sample))
    }
}
