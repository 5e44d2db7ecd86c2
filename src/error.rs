//! Error types for procmet
//!
//! A source that cannot see its process is not an error here: that case is
//! reported as `Ok(None)` by the sources. Everything in this enum is a real
//! failure of a sampling pass, of the configuration, or of the output.

use std::fmt;
use std::io;

/// Errors raised by procmet
#[derive(Debug)]
pub enum ProcmetError {
    /// Rejected configuration value
    InvalidConfiguration(String),
    /// A kernel-exposed field did not have the expected shape
    Parse { field: String, value: String },
    /// procfs failed in a way that does not mean "process gone"
    Proc(procfs::ProcError),
    /// Writing output failed
    Io(io::Error),
    /// The interrupt handler could not be installed
    Signal(ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, ProcmetError>;

impl ProcmetError {
    pub(crate) fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        ProcmetError::Parse {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ProcmetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcmetError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            ProcmetError::Parse { field, value } => {
                write!(f, "malformed value for {field}: {value:?}")
            }
            ProcmetError::Proc(err) => write!(f, "procfs error: {err}"),
            ProcmetError::Io(err) => write!(f, "I/O error: {err}"),
            ProcmetError::Signal(err) => write!(f, "failed to install interrupt handler: {err}"),
        }
    }
}

impl std::error::Error for ProcmetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcmetError::Proc(err) => Some(err),
            ProcmetError::Io(err) => Some(err),
            ProcmetError::Signal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ProcmetError {
    fn from(err: io::Error) -> Self {
        ProcmetError::Io(err)
    }
}

impl From<procfs::ProcError> for ProcmetError {
    fn from(err: procfs::ProcError) -> Self {
        ProcmetError::Proc(err)
    }
}

impl From<ctrlc::Error> for ProcmetError {
    fn from(err: ctrlc::Error) -> Self {
        ProcmetError::Signal(err)
    }
}
