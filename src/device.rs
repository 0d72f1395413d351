//! Identity of a configured thermometer.

use crate::mac_address::MacAddress;
use std::fmt;

/// Display name used when neither the user nor the device supplies one.
pub const DEFAULT_NAME: &str = "Salter BLE";

/// Stable identity of a configured device.
///
/// Hardware addresses are stored as `AA:BB:CC:DD:EE:FF` whichever spelling
/// they arrived in. Anything else (opaque host identifiers) is kept verbatim
/// apart from case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    pub fn new(address: &str) -> Self {
        Self(canonical(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an advertisement address refers to this device.
    pub fn matches(&self, address: &str) -> bool {
        self.0 == canonical(address)
    }

    /// Unique id of the temperature sensor, e.g. `salter_AABBCCDDEEFF_temp`.
    pub fn sensor_unique_id(&self) -> String {
        format!("salter_{}_temp", self.0.replace(':', ""))
    }
}

fn canonical(address: &str) -> String {
    let address = address.trim();
    match address.parse::<MacAddress>() {
        Ok(mac) => mac.to_string(),
        Err(_) => address.to_uppercase(),
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A device accepted by the setup gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub identity: DeviceIdentity,
    pub name: String,
}

impl DeviceConfig {
    pub fn new(address: &str, name: Option<&str>) -> Self {
        Self {
            identity: DeviceIdentity::new(address),
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_NAME)
                .to_string(),
        }
    }
}
