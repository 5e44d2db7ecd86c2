//! Core sampling functionality
//!
//! The loop that ties sources, aggregation and output together, plus the
//! defaults every other module starts from.

pub mod constants;
pub mod sampler;

// Re-export main types
pub use sampler::{exit_code, Sampler, SamplingResult, Shutdown, ShutdownHandle, StopReason};
