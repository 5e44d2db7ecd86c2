//! Merge the readings of every relevant source into one sample

use super::metrics::Sample;
use super::{MetricSource, Pid};
use crate::error::Result;
use log::debug;

/// Queries the registered sources for a requested set of metric names
pub struct Aggregator {
    sources: Vec<Box<dyn MetricSource>>,
}

impl Aggregator {
    pub fn new(sources: Vec<Box<dyn MetricSource>>) -> Self {
        Self { sources }
    }

    /// Every declared metric name, in registration order, without repeats
    pub fn available_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for source in &self.sources {
            for name in source.names() {
                if !names.contains(name) {
                    names.push(*name);
                }
            }
        }
        names
    }

    /// Collect one sample for `pid`
    ///
    /// Only sources declaring at least one requested name are asked. Returns
    /// `Ok(None)` when none of them produced data, which means the process is
    /// gone. Requested names that no source produced are simply missing from
    /// the sample.
    pub fn collect(&self, requested: &[String], pid: Pid) -> Result<Option<Sample>> {
        let mut merged: Option<Sample> = None;

        for source in &self.sources {
            let wanted = source
                .names()
                .iter()
                .any(|name| requested.iter().any(|r| r == name));
            if !wanted {
                continue;
            }

            match source.sample(pid)? {
                Some(sample) => merged.get_or_insert_with(Sample::new).merge(sample),
                None => debug!("{} source: no data for pid {}", source.label(), pid),
            }
        }

        Ok(merged)
    }
}
