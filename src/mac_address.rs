//! Bluetooth hardware address type.
//!
//! Host scanners hand addresses over as text, either as colon-separated
//! octets (`AA:BB:CC:DD:EE:FF`) or as 12 bare hex characters. Some hosts use
//! opaque identifiers instead, so parsing is fallible and callers decide what
//! an unparseable address means for them.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Bluetooth MAC address stored as a compact 6-byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The address bytes in reverse order.
    ///
    /// Salter thermometers embed their own address this way inside the
    /// manufacturer-data payload.
    pub fn reversed(&self) -> [u8; 6] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    /// Address as 12 uppercase hex characters without separators.
    pub fn compact(&self) -> String {
        self.0.iter().map(|b| format!("{b:02X}")).collect()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Errors returned when parsing a MAC address string.
#[derive(Error, Debug, PartialEq)]
pub enum ParseMacError {
    #[error("invalid MAC address: expected 12 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid MAC address: '{0}' is not valid hex")]
    InvalidHex(String),
}

impl FromStr for MacAddress {
    type Err = ParseMacError;

    /// Parses either form. Colons are removed before the length check, so
    /// `AA:BB:CC:DD:EE:FF` and `aabbccddeeff` are the same address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseMacError::InvalidHex(digits));
        }
        if digits.len() != 12 {
            return Err(ParseMacError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let part = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| ParseMacError::InvalidHex(part.to_string()))?;
        }

        Ok(MacAddress(bytes))
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

#[cfg(feature = "bluer")]
impl From<bluer::Address> for MacAddress {
    fn from(addr: bluer::Address) -> Self {
        Self(addr.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let addr = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(format!("{}", addr), "AA:BB:CC:DD:EE:FF");
        assert_eq!(addr.compact(), "AABBCCDDEEFF");
    }

    #[test]
    fn test_reversed() {
        let addr: MacAddress = "AA:BB:CC:DD:EE:FF".parse().unwrap();
        assert_eq!(addr.reversed(), [0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA]);
        // the stored order is untouched
        assert_eq!(addr.0, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_from_str_colon_and_compact_forms_agree() {
        let colon: MacAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        let compact: MacAddress = "AABBCCDDEEFF".parse().unwrap();
        assert_eq!(colon, compact);
        assert_eq!(colon.0, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_from_str_invalid() {
        assert_eq!(
            "ABCDEF".parse::<MacAddress>(),
            Err(ParseMacError::InvalidLength(6))
        );
        assert!(matches!(
            "invalid".parse::<MacAddress>(),
            Err(ParseMacError::InvalidHex(_))
        ));
        assert!(matches!(
            "+A+B+C+D+E+F".parse::<MacAddress>(),
            Err(ParseMacError::InvalidHex(_))
        ));
        assert_eq!(
            "AA:BB:CC".parse::<MacAddress>(),
            Err(ParseMacError::InvalidLength(6))
        );
        assert!(matches!(
            "AA:BB:CC:DD:EE:GG".parse::<MacAddress>(),
            Err(ParseMacError::InvalidHex(_))
        ));
        // macOS style peripheral identifiers are not hardware addresses
        assert!(
            "5E3C1A2B-0000-4A4A-8F8F-0123456789AB"
                .parse::<MacAddress>()
                .is_err()
        );
    }

    #[test]
    fn test_from_str_rejects_multibyte_input_without_panicking() {
        assert!("ÅÅÅÅÅÅ".parse::<MacAddress>().is_err());
    }
}
