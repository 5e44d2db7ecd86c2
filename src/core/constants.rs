//! Default values shared by the configuration, the formatter and the CLI

use std::time::Duration;

/// Sampling interval defaults
pub mod sampling {
    use super::Duration;

    /// Interval between two samples when none is given
    pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

    pub const DEFAULT: Duration = Duration::from_secs(1);
}

/// Output rendering defaults
pub mod output {
    /// Field separator
    pub const DEFAULT_DELIMITER: &str = " ";

    /// chrono strftime pattern, renders as `2024-01-31_13:37:00.123456`
    pub const DEFAULT_DT_FORMAT: &str = "%Y-%m-%d_%H:%M:%S%.6f";

    /// Rendered in place of a metric with no value
    pub const PLACEHOLDER: &str = "-";

    /// First header column, the timestamp
    pub const TIMESTAMP_HEADER: &str = "dt";
}

/// Kernel interface defaults
pub mod kernel {
    /// Mount point of the process information pseudo-filesystem
    pub const DEFAULT_ROOT: &str = "/proc";

    /// Used when sysconf cannot report clock ticks per second
    pub const FALLBACK_TICKS_PER_SECOND: u64 = 100;
}
