//! Delimited text rendering of samples
//!
//! Every row is flushed as soon as it is written so a reader on the other
//! end of a pipe sees samples in real time.

use crate::core::constants::output::{PLACEHOLDER, TIMESTAMP_HEADER};
use crate::monitor::Sample;
use chrono::{DateTime, Local};
use std::io::{self, Write};

/// Renders the header and sample rows
#[derive(Debug, Clone)]
pub struct Formatter {
    names: Vec<String>,
    delimiter: String,
    dt_format: String,
}

impl Formatter {
    /// `dt_format` must already be a valid strftime pattern
    pub fn new(
        names: Vec<String>,
        delimiter: impl Into<String>,
        dt_format: impl Into<String>,
    ) -> Self {
        Self {
            names,
            delimiter: delimiter.into(),
            dt_format: dt_format.into(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Write `dt` followed by the metric names
    pub fn print_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut line = String::from(TIMESTAMP_HEADER);
        for name in &self.names {
            line.push_str(&self.delimiter);
            line.push_str(name);
        }
        writeln!(out, "{line}")?;
        out.flush()
    }

    /// Write one row stamped with the current local time
    pub fn print_metrics<W: Write>(&self, out: &mut W, sample: &Sample) -> io::Result<()> {
        self.print_metrics_at(out, &Local::now(), sample)
    }

    pub fn print_metrics_at<W: Write>(
        &self,
        out: &mut W,
        timestamp: &DateTime<Local>,
        sample: &Sample,
    ) -> io::Result<()> {
        let line = self.render_row(timestamp, sample);
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn render_row(&self, timestamp: &DateTime<Local>, sample: &Sample) -> String {
        let mut line = timestamp.format(&self.dt_format).to_string();
        for name in &self.names {
            line.push_str(&self.delimiter);
            match sample.get(name) {
                Some(value) => line.push_str(&value.to_string()),
                None => line.push_str(PLACEHOLDER),
            }
        }
        line
    }
}
