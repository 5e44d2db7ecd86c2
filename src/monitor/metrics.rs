//! Metric names and values
//!
//! A [`Sample`] maps metric names to [`MetricValue`]s for one sampling pass.
//! Its iteration order carries no meaning: output columns follow the requested
//! name order, which the formatter walks and looks up here.

use std::collections::HashMap;
use std::fmt;

/// `VmSize` from the status record, in kB as reported by the kernel
pub const VM_SIZE: &str = "vm_size";
/// `VmRSS` from the status record, in kB as reported by the kernel
pub const VM_RSS: &str = "vm_rss";
/// Number of open file descriptors
pub const FD: &str = "fd";
/// Average CPU utilization since process start
pub const CPU_PERCENT: &str = "cpu_percent";
/// Bytes the process caused to be fetched from storage
pub const READ_BYTES: &str = "read_bytes";
/// Bytes the process caused to be sent to storage
pub const WRITE_BYTES: &str = "write_bytes";

/// A single metric observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Byte, kilobyte or descriptor count
    Count(u64),
    /// Percentage, already rounded to two decimals
    Percent(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Percent(p) => write!(f, "{p:.2}"),
        }
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        MetricValue::Count(n)
    }
}

/// Metric values collected during one sampling pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: HashMap<String, MetricValue>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Move every value of `other` into `self`, overwriting on collision
    pub fn merge(&mut self, other: Sample) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for Sample {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (name, value) in iter {
            sample.insert(name, value);
        }
        sample
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
