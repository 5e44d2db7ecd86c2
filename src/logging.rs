//! Minimal stderr backend for the `log` facade
//!
//! Samples go to stdout, so diagnostics must never end up there.

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error".red(),
            Level::Warn => "warn".yellow(),
            Level::Info => "info".green(),
            Level::Debug => "debug".cyan(),
            Level::Trace => "trace".bright_black(),
        };
        let _ = writeln!(std::io::stderr().lock(), "[{}] {}", tag, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level used for a given `--debug` setting
pub fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger; later calls are ignored
pub fn init(debug: bool) {
    let level = level_for(debug);
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}
