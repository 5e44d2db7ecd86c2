//! Virtual and resident memory from `/proc/<pid>/status`

use super::metrics::{Sample, VM_RSS, VM_SIZE};
use super::{pid_dir, read_proc_file, MetricSource, Pid};
use crate::error::{ProcmetError, Result};
use std::path::{Path, PathBuf};

const NAMES: &[&str] = &[VM_SIZE, VM_RSS];

/// Status record keys, paired with the metric each one feeds
const FIELDS: &[(&str, &str)] = &[("VmSize", VM_SIZE), ("VmRSS", VM_RSS)];

pub struct MemorySource {
    proc_root: PathBuf,
}

impl MemorySource {
    pub fn new(proc_root: &Path) -> Self {
        Self {
            proc_root: proc_root.to_path_buf(),
        }
    }
}

impl MetricSource for MemorySource {
    fn label(&self) -> &'static str {
        "memory"
    }

    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn sample(&self, pid: Pid) -> Result<Option<Sample>> {
        let path = pid_dir(&self.proc_root, pid).join("status");
        match read_proc_file(&path)? {
            Some(contents) => parse_status(&contents).map(Some),
            None => Ok(None),
        }
    }
}

/// Pull the memory fields out of a status record
///
/// Keys that are missing (kernel threads carry no `Vm*` lines) are left out of
/// the sample; keys that are present must parse.
pub fn parse_status(contents: &str) -> Result<Sample> {
    let mut sample = Sample::new();
    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if let Some((_, name)) = FIELDS.iter().find(|(field, _)| *field == key) {
            let kb = parse_kb(value).map_err(|_| ProcmetError::parse(key, value.trim()))?;
            sample.insert(*name, kb);
        }
    }
    Ok(sample)
}

/// Parse a `"<digits> kB"` status value into the raw kilobyte figure
///
/// The number is returned as the kernel wrote it, not scaled to bytes.
pub fn parse_kb(value: &str) -> Result<u64> {
    let malformed = || ProcmetError::parse("kB value", value);

    let digits = value
        .trim()
        .strip_suffix("kB")
        .ok_or_else(malformed)?
        .trim_end();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits.parse().map_err(|_| malformed())
}
