//! Temperature decoding for advertisements from a known device.
//!
//! The decoder trusts the sender address (the subscription already filtered
//! on it) and only needs the payload header to trust the layout, so there is
//! no embedded-address check here.

use crate::advertisement::Advertisement;
use crate::payload::{PayloadError, parse_payload};

/// A temperature read from one manufacturer-data entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub company_id: u16,
    /// Tenths of a degree Celsius, as transmitted
    pub raw: u16,
    /// Degrees Celsius
    pub celsius: f64,
}

/// Full outcome of decoding one advertisement.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoding {
    pub reading: Option<Decoded>,
    /// Entries skipped before a reading was found, in inspection order
    pub rejected_entries: Vec<(u16, PayloadError)>,
}

/// Temperature in °C from the first Salter payload, if any.
pub fn decode(advertisement: &Advertisement) -> Option<f64> {
    inspect(advertisement).reading.map(|r| r.celsius)
}

/// Decode and keep the reasons entries were skipped.
pub fn inspect(advertisement: &Advertisement) -> Decoding {
    let mut rejected_entries = Vec::new();

    for (&company_id, bytes) in &advertisement.manufacturer_data {
        match parse_payload(bytes) {
            Ok(payload) => {
                return Decoding {
                    reading: Some(Decoded {
                        company_id,
                        raw: payload.raw_temperature(),
                        celsius: payload.temperature(),
                    }),
                    rejected_entries,
                };
            }
            Err(e) => rejected_entries.push((company_id, e)),
        }
    }

    Decoding {
        reading: None,
        rejected_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac_address::MacAddress;
    use crate::test_utils::{TEST_COMPANY_ID, payload_with_raw, sample_payload, salter_advertisement};

    #[test]
    fn test_decode_sample_payload() {
        let adv = Advertisement::new("FF:EE:DD:CC:BB:AA")
            .with_manufacturer_data(TEST_COMPANY_ID, sample_payload());
        assert_eq!(decode(&adv), Some(100.0));
    }

    #[test]
    fn test_decode_scales_raw_value() {
        for raw in [0u16, 1, 100, 215, 999, 1000, u16::MAX] {
            let adv = salter_advertisement(raw);
            assert_eq!(decode(&adv), Some(f64::from(raw) / 10.0), "raw {raw}");
        }
    }

    #[test]
    fn test_decode_ignores_embedded_address() {
        // the sample payload does not embed this sender's address
        let adv = Advertisement::new("AA:BB:CC:DD:EE:FF")
            .with_manufacturer_data(TEST_COMPANY_ID, payload_with_raw(100));
        assert!(!crate::classifier::classify(&adv));
        assert_eq!(decode(&adv), Some(10.0));
    }

    #[test]
    fn test_decode_without_manufacturer_data() {
        let adv = Advertisement::new("AA:BB:CC:DD:EE:FF").with_name("SALTER-BKT");
        let result = inspect(&adv);
        assert_eq!(result.reading, None);
        assert!(result.rejected_entries.is_empty());
    }

    #[test]
    fn test_decode_skips_invalid_entries() {
        let mut bad_header = payload_with_raw(500);
        bad_header[1] = 0x00;

        let adv = Advertisement::new(MacAddress::default().to_string())
            .with_manufacturer_data(1, vec![0x01, 0x01, 0x01, 0x00])
            .with_manufacturer_data(2, bad_header)
            .with_manufacturer_data(3, payload_with_raw(215));

        let result = inspect(&adv);
        assert_eq!(
            result.reading,
            Some(Decoded {
                company_id: 3,
                raw: 215,
                celsius: 21.5
            })
        );
        assert_eq!(
            result.rejected_entries,
            vec![
                (1, PayloadError::TooShort(4)),
                (2, PayloadError::HeaderMismatch([0x01, 0x00, 0x01])),
            ]
        );
    }

    #[test]
    fn test_decode_only_invalid_entries() {
        let adv = Advertisement::new("AA:BB:CC:DD:EE:FF")
            .with_manufacturer_data(1, payload_with_raw(100)[..15].to_vec());
        assert_eq!(decode(&adv), None);
    }

    #[test]
    fn test_decode_stops_at_first_valid_entry() {
        let adv = Advertisement::new("AA:BB:CC:DD:EE:FF")
            .with_manufacturer_data(1, payload_with_raw(100))
            .with_manufacturer_data(2, payload_with_raw(200));
        let result = inspect(&adv);
        assert_eq!(result.reading.map(|r| r.company_id), Some(1));
        assert_eq!(decode(&adv), Some(10.0));
    }
}
