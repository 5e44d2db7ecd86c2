//! Metric sources and their aggregation
//!
//! Every source reads one corner of the proc filesystem for a single pid and
//! returns `Ok(None)` when that data is not there (process gone, permission
//! denied). Nothing is cached between calls, so a process that exits between
//! two samples is always noticed on the next pass.

pub mod aggregator;
pub mod cpu;
pub mod fd;
pub mod io;
pub mod memory;
pub mod metrics;

pub use aggregator::Aggregator;
pub use cpu::CpuSource;
pub use fd::FdSource;
pub use io::IoSource;
pub use memory::MemorySource;
pub use metrics::{MetricValue, Sample};

use crate::error::Result;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// errno returned by reads of a proc file whose process has just exited
const ESRCH: i32 = 3;

/// Process identifier as the kernel reports it
pub type Pid = u32;

/// A provider of one or more named metrics
pub trait MetricSource {
    /// Short label used in log messages
    fn label(&self) -> &'static str;

    /// Metric names this source can produce
    fn names(&self) -> &'static [&'static str];

    /// Take one reading; `Ok(None)` signals the process data is absent
    fn sample(&self, pid: Pid) -> Result<Option<Sample>>;
}

/// Build the fixed source list in registration order
pub fn default_sources(proc_root: &Path) -> Vec<Box<dyn MetricSource>> {
    vec![
        Box::new(MemorySource::new(proc_root)),
        Box::new(FdSource::new(proc_root)),
        Box::new(CpuSource::new(proc_root)),
        Box::new(IoSource::new(proc_root)),
    ]
}

/// `<root>/<pid>`
pub(crate) fn pid_dir(proc_root: &Path, pid: Pid) -> PathBuf {
    proc_root.join(pid.to_string())
}

/// Read a per-process text file; `Ok(None)` when the process data is gone
///
/// Bytes that are not UTF-8 (a process name may hold anything) are replaced
/// rather than rejected. I/O failures other than a missing file, a denied read
/// or a vanished process are real errors.
pub(crate) fn read_proc_file(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if is_absent_io(&err) => {
            debug!("{} unavailable: {}", path.display(), err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn is_absent_io(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
        || err.raw_os_error() == Some(ESRCH)
}

/// Decide whether a procfs failure means the process data is simply gone
pub(crate) fn is_absence(err: &procfs::ProcError) -> bool {
    matches!(
        err,
        procfs::ProcError::NotFound(_)
            | procfs::ProcError::PermissionDenied(_)
            | procfs::ProcError::Io(..)
    )
}
