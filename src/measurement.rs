//! Accepted temperature reading.

use crate::device::DeviceIdentity;
use std::time::SystemTime;

/// A plausible, rounded temperature published by a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Identity of the thermometer
    pub device: DeviceIdentity,
    /// Display name of the thermometer
    pub name: String,
    /// Timestamp when the advertisement was handled
    pub timestamp: SystemTime,
    /// Temperature in Celsius, one decimal
    pub temperature: f64,
}
