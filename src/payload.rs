//! Salter manufacturer-data payload layout.
//!
//! ```text
//! offset  len  meaning
//! 0..3     3   header, always 01 01 01
//! 4..10    6   sender address, byte-reversed
//! 13..15   2   temperature, u16 little-endian, tenths of a degree Celsius
//! ```
//!
//! Payloads are at least 16 bytes long. Both the classifier and the decoder
//! go through [`parse_payload`] so the header and length rules live in one
//! place.

use thiserror::Error;

/// Fixed protocol header.
pub const HEADER: [u8; 3] = [0x01, 0x01, 0x01];

/// Shortest payload that carries every field.
pub const MIN_PAYLOAD_LEN: usize = 16;

const MAC_OFFSET: usize = 4;
const TEMPERATURE_OFFSET: usize = 13;

/// Why a manufacturer-data entry is not a Salter payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload too short: {0} bytes, need at least 16")]
    TooShort(usize),
    #[error("header mismatch: {0:02X?}")]
    HeaderMismatch([u8; 3]),
}

/// A structurally valid Salter payload borrowed from an advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalterPayload<'a> {
    bytes: &'a [u8],
}

impl<'a> SalterPayload<'a> {
    /// The full payload.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The 6-byte window holding the sender's reversed address.
    pub fn embedded_address(&self) -> [u8; 6] {
        let mut window = [0u8; 6];
        window.copy_from_slice(&self.bytes[MAC_OFFSET..MAC_OFFSET + 6]);
        window
    }

    /// Raw temperature in tenths of a degree.
    pub fn raw_temperature(&self) -> u16 {
        u16::from_le_bytes([
            self.bytes[TEMPERATURE_OFFSET],
            self.bytes[TEMPERATURE_OFFSET + 1],
        ])
    }

    /// Temperature in degrees Celsius.
    pub fn temperature(&self) -> f64 {
        f64::from(self.raw_temperature()) / 10.0
    }
}

/// Check the length and header of one manufacturer-data entry.
pub fn parse_payload(bytes: &[u8]) -> Result<SalterPayload<'_>, PayloadError> {
    if bytes.len() < MIN_PAYLOAD_LEN {
        return Err(PayloadError::TooShort(bytes.len()));
    }

    let header = [bytes[0], bytes[1], bytes[2]];
    if header != HEADER {
        return Err(PayloadError::HeaderMismatch(header));
    }

    Ok(SalterPayload { bytes })
}
