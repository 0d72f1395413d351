//! Output formatters for accepted temperature readings.

pub mod influxdb;

use crate::measurement::Measurement;

/// Trait for formatting measurements into output strings.
pub trait OutputFormatter: Send + Sync {
    /// Format one measurement as a single line, without the trailing newline.
    fn format(&self, measurement: &Measurement) -> String;
}
