//! Open file descriptor count from `/proc/<pid>/fd`

use super::metrics::{Sample, FD};
use super::{pid_dir, MetricSource, Pid};
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const NAMES: &[&str] = &[FD];

pub struct FdSource {
    proc_root: PathBuf,
}

impl FdSource {
    pub fn new(proc_root: &Path) -> Self {
        Self {
            proc_root: proc_root.to_path_buf(),
        }
    }
}

impl MetricSource for FdSource {
    fn label(&self) -> &'static str {
        "fd"
    }

    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn sample(&self, pid: Pid) -> Result<Option<Sample>> {
        let fd_dir = pid_dir(&self.proc_root, pid).join("fd");
        // Listing races with the process closing descriptors or exiting;
        // either way there is nothing to report this pass.
        match fs::read_dir(&fd_dir) {
            Ok(entries) => {
                let count = entries.filter(|entry| entry.is_ok()).count() as u64;
                let mut sample = Sample::new();
                sample.insert(FD, count);
                Ok(Some(sample))
            }
            Err(err) => {
                debug!("{} unavailable: {}", fd_dir.display(), err);
                Ok(None)
            }
        }
    }
}
