use crate::advertisement::Advertisement;
use crate::mac_address::MacAddress;

/// A stable MAC address for unit tests.
pub const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

/// Arbitrary company identifier; Salter payloads are matched by content.
pub const TEST_COMPANY_ID: u16 = 0x0101;

/// `01 01 01 00 AA BB CC DD EE FF 00 00 00 E8 03 00`: embeds the reversed
/// address of `FF:EE:DD:CC:BB:AA` and a raw temperature of 1000.
pub fn sample_payload() -> Vec<u8> {
    vec![
        0x01, 0x01, 0x01, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00, 0x00, 0x00, 0xE8, 0x03,
        0x00,
    ]
}

/// Sample payload with bytes 13..15 replaced by `raw` (little-endian).
pub fn payload_with_raw(raw: u16) -> Vec<u8> {
    let mut payload = sample_payload();
    payload[13..15].copy_from_slice(&raw.to_le_bytes());
    payload
}

/// A valid payload that embeds `mac` the way a real device does.
pub fn payload_for(mac: MacAddress, raw: u16) -> Vec<u8> {
    let mut payload = payload_with_raw(raw);
    payload[4..10].copy_from_slice(&mac.reversed());
    payload
}

/// Advertisement from [`TEST_MAC`] carrying one valid payload.
pub fn salter_advertisement(raw: u16) -> Advertisement {
    Advertisement::new(TEST_MAC.to_string())
        .with_manufacturer_data(TEST_COMPANY_ID, payload_for(TEST_MAC, raw))
}
