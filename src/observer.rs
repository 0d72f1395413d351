//! Diagnostic side channel.
//!
//! The classifier and decoder never log. Callers that drive them (the setup
//! gate and the sensor) translate their structured results into [`Event`]s
//! and hand them to an [`Observer`]. The default observer forwards events to
//! `tracing`; tests install a recording one.

use crate::classifier::{EntryRejection, Match};

/// Something worth reporting while handling advertisements.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AdvertisementReceived {
        address: String,
        name: Option<String>,
        rssi: Option<i16>,
    },
    NoManufacturerData {
        address: String,
    },
    EntryRejected {
        address: String,
        company_id: u16,
        reason: EntryRejection,
    },
    DeviceSupported {
        address: String,
        matched: Match,
    },
    DeviceNotSupported {
        address: String,
    },
    TemperatureDecoded {
        address: String,
        raw: u16,
        celsius: f64,
    },
    NoTemperature {
        address: String,
    },
    TemperatureOutOfRange {
        address: String,
        celsius: f64,
    },
    ListeningStarted {
        address: String,
    },
    ListeningStopped {
        address: String,
    },
}

/// Receives diagnostic events. Implementations must not block.
pub trait Observer: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// Emits every event as a `tracing` event under this module's target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: &Event) {
        match event {
            Event::AdvertisementReceived {
                address,
                name,
                rssi,
            } => tracing::trace!(%address, ?name, ?rssi, "advertisement received"),
            Event::NoManufacturerData { address } => {
                tracing::debug!(%address, "no manufacturer data")
            }
            Event::EntryRejected {
                address,
                company_id,
                reason,
            } => tracing::debug!(%address, company_id, %reason, "manufacturer data rejected"),
            Event::DeviceSupported { address, matched } => {
                tracing::info!(%address, ?matched, "supported device found")
            }
            Event::DeviceNotSupported { address } => {
                tracing::trace!(%address, "device not supported")
            }
            Event::TemperatureDecoded {
                address,
                raw,
                celsius,
            } => tracing::debug!(%address, raw, celsius, "temperature decoded"),
            Event::NoTemperature { address } => {
                tracing::debug!(%address, "no valid temperature decoded")
            }
            Event::TemperatureOutOfRange { address, celsius } => {
                tracing::debug!(%address, celsius, "discarding out-of-range temperature")
            }
            Event::ListeningStarted { address } => {
                tracing::info!(%address, "listening for Salter advertisements")
            }
            Event::ListeningStopped { address } => {
                tracing::info!(%address, "stopped listening")
            }
        }
    }
}
