//! BLE advertisement as delivered by a scanner backend.

use crate::mac_address::MacAddress;
use std::collections::BTreeMap;

/// Manufacturer-specific data keyed by Bluetooth SIG company identifier.
pub type ManufacturerData = BTreeMap<u16, Vec<u8>>;

/// One received advertisement.
///
/// The address is kept as the host reported it. Hosts that do not expose
/// hardware addresses hand over an opaque identifier instead, and the
/// classifier has to tolerate that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Advertisement {
    /// Local name, when the device broadcasts one
    pub name: Option<String>,
    /// Sender address, usually `AA:BB:CC:DD:EE:FF`
    pub address: String,
    /// Received signal strength in dBm, when the backend reports it
    pub rssi: Option<i16>,
    /// Every manufacturer-data entry carried by the advertisement
    pub manufacturer_data: ManufacturerData,
}

impl Advertisement {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rssi(mut self, rssi: i16) -> Self {
        self.rssi = Some(rssi);
        self
    }

    pub fn with_manufacturer_data(mut self, company_id: u16, payload: impl Into<Vec<u8>>) -> Self {
        self.manufacturer_data.insert(company_id, payload.into());
        self
    }

    /// The sender's hardware address, if the reported address is one.
    pub fn hardware_address(&self) -> Option<MacAddress> {
        self.address.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_all_entries() {
        let adv = Advertisement::new("AA:BB:CC:DD:EE:FF")
            .with_name("SALTER-BKT-1")
            .with_rssi(-60)
            .with_manufacturer_data(0x0001, vec![1, 2, 3])
            .with_manufacturer_data(0x004C, vec![4, 5]);

        assert_eq!(adv.name.as_deref(), Some("SALTER-BKT-1"));
        assert_eq!(adv.rssi, Some(-60));
        assert_eq!(adv.manufacturer_data.len(), 2);
    }

    #[test]
    fn test_hardware_address() {
        let adv = Advertisement::new("aa:bb:cc:dd:ee:ff");
        assert_eq!(
            adv.hardware_address(),
            Some(MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]))
        );

        let opaque = Advertisement::new("5E3C1A2B-0000-4A4A-8F8F-0123456789AB");
        assert_eq!(opaque.hardware_address(), None);
    }
}
