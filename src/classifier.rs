//! Decide whether an advertisement comes from a Salter thermometer.
//!
//! Signals are checked cheapest first:
//! 1. the broadcast name starts with `SALTER-BKT` (any case);
//! 2. some manufacturer-data entry is a Salter payload that, when the sender
//!    address is a real hardware address, embeds that address byte-reversed.
//!
//! Everything here is a pure function of the advertisement. The per-entry
//! verdicts are returned rather than logged so callers can report them
//! through an [`Observer`](crate::observer::Observer).

use crate::advertisement::Advertisement;
use crate::mac_address::MacAddress;
use crate::payload::{PayloadError, parse_payload};
use thiserror::Error;

/// Name prefix advertised by Salter firmware.
pub const NAME_PREFIX: &str = "SALTER-BKT";

/// Which signal identified the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    NamePrefix,
    ManufacturerData { company_id: u16 },
}

/// Why a single manufacturer-data entry was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRejection {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("embedded address {embedded:02X?} does not match sender")]
    AddressMismatch { embedded: [u8; 6] },
}

/// Full outcome of classifying one advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The accepting signal, `None` when rejected
    pub matched: Option<Match>,
    /// Entries inspected before a decision was reached, in inspection order
    pub rejected_entries: Vec<(u16, EntryRejection)>,
}

impl Classification {
    pub fn is_supported(&self) -> bool {
        self.matched.is_some()
    }
}

/// `true` when the advertisement belongs to a supported device.
pub fn classify(advertisement: &Advertisement) -> bool {
    inspect(advertisement).is_supported()
}

/// Classify and keep the reasons entries were skipped.
pub fn inspect(advertisement: &Advertisement) -> Classification {
    let mut rejected_entries = Vec::new();

    if has_salter_name(advertisement.name.as_deref()) {
        return Classification {
            matched: Some(Match::NamePrefix),
            rejected_entries,
        };
    }

    let sender = advertisement.hardware_address();
    for (&company_id, payload) in &advertisement.manufacturer_data {
        match check_entry(payload, sender) {
            Ok(()) => {
                return Classification {
                    matched: Some(Match::ManufacturerData { company_id }),
                    rejected_entries,
                };
            }
            Err(rejection) => rejected_entries.push((company_id, rejection)),
        }
    }

    Classification {
        matched: None,
        rejected_entries,
    }
}

fn has_salter_name(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.to_uppercase().starts_with(NAME_PREFIX))
}

/// Check one entry. Without a parseable sender address the cross-check is
/// skipped and the header alone decides.
pub fn check_entry(payload: &[u8], sender: Option<MacAddress>) -> Result<(), EntryRejection> {
    let payload = parse_payload(payload)?;

    if let Some(mac) = sender {
        let embedded = payload.embedded_address();
        if embedded != mac.reversed() {
            return Err(EntryRejection::AddressMismatch { embedded });
        }
    }

    Ok(())
}
