//! procmet: sample memory, file descriptor, CPU and I/O metrics of a single
//! Linux process and print them as delimited text rows.
//!
//! ```no_run
//! use procmet::{default_sources, Sampler, SamplerConfig, Shutdown};
//!
//! # fn main() -> procmet::Result<()> {
//! let config = SamplerConfig::builder(std::process::id()).interval_secs(0.5).build()?;
//! let sources = default_sources(&config.proc_root);
//! let sampler = Sampler::new(config, sources);
//! let shutdown = Shutdown::install_ctrlc()?;
//! sampler.run(&mut std::io::stdout().lock(), &shutdown)?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(target_os = "linux"))]
compile_error!("procmet reads /proc and only supports Linux");

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod output;

pub use config::{SamplerConfig, SamplerConfigBuilder};
pub use crate::core::{exit_code, Sampler, SamplingResult, Shutdown, ShutdownHandle, StopReason};
pub use error::{ProcmetError, Result};
pub use monitor::{default_sources, Aggregator, MetricSource, MetricValue, Pid, Sample};
pub use output::Formatter;
