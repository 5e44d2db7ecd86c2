//! Storage I/O counters from `/proc/<pid>/io`
//!
//! The io file is only readable by the process owner (ptrace access mode),
//! so for foreign processes this source usually reports nothing.

use super::metrics::{Sample, READ_BYTES, WRITE_BYTES};
use super::{pid_dir, read_proc_file, MetricSource, Pid};
use crate::error::{ProcmetError, Result};
use std::path::{Path, PathBuf};

const NAMES: &[&str] = &[READ_BYTES, WRITE_BYTES];

pub struct IoSource {
    proc_root: PathBuf,
}

impl IoSource {
    pub fn new(proc_root: &Path) -> Self {
        Self {
            proc_root: proc_root.to_path_buf(),
        }
    }
}

impl MetricSource for IoSource {
    fn label(&self) -> &'static str {
        "io"
    }

    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn sample(&self, pid: Pid) -> Result<Option<Sample>> {
        let path = pid_dir(&self.proc_root, pid).join("io");
        match read_proc_file(&path)? {
            Some(contents) => parse_io(&contents).map(Some),
            None => Ok(None),
        }
    }
}

pub fn parse_io(contents: &str) -> Result<Sample> {
    let mut sample = Sample::new();
    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key == READ_BYTES || key == WRITE_BYTES {
            let value = value.trim();
            let bytes: u64 = value
                .parse()
                .map_err(|_| ProcmetError::parse(key, value))?;
            sample.insert(key, bytes);
        }
    }
    Ok(sample)
}
