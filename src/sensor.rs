//! Temperature sensor entity for one configured thermometer.
//!
//! The sensor owns the latest accepted reading. Every advertisement is
//! decoded independently; only plausible values replace the stored one.

use crate::advertisement::Advertisement;
use crate::classifier::EntryRejection;
use crate::decoder;
use crate::device::{DeviceConfig, DeviceIdentity};
use crate::measurement::Measurement;
use crate::observer::{Event, Observer};
use std::sync::Arc;
use std::time::SystemTime;

/// Readings at or below this are discarded.
pub const MIN_CELSIUS: f64 = -50.0;
/// Readings at or above this are discarded.
pub const MAX_CELSIUS: f64 = 100.0;

pub const UNIT_OF_MEASUREMENT: &str = "°C";
pub const DEVICE_CLASS: &str = "temperature";
pub const STATE_CLASS: &str = "measurement";

/// Whether a decoded value is a believable temperature.
pub fn is_plausible(celsius: f64) -> bool {
    celsius > MIN_CELSIUS && celsius < MAX_CELSIUS
}

/// Round to one decimal place.
pub fn round_tenth(celsius: f64) -> f64 {
    (celsius * 10.0).round() / 10.0
}

/// What a single advertisement did to the sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    /// New value stored
    Accepted(f64),
    /// Decoded but implausible; previous value kept
    OutOfRange(f64),
    /// Nothing decodable
    NoReading,
}

pub struct TemperatureSensor {
    config: DeviceConfig,
    value: Option<f64>,
    observer: Arc<dyn Observer>,
}

impl TemperatureSensor {
    pub fn new(config: DeviceConfig, observer: Arc<dyn Observer>) -> Self {
        Self {
            config,
            value: None,
            observer,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.config.identity
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn unique_id(&self) -> String {
        self.config.identity.sensor_unique_id()
    }

    /// Latest accepted temperature, `None` until the first one arrives.
    pub fn native_value(&self) -> Option<f64> {
        self.value
    }

    pub(crate) fn observer(&self) -> &Arc<dyn Observer> {
        &self.observer
    }

    /// Decode one advertisement and update the stored value.
    pub fn handle(&mut self, advertisement: &Advertisement) -> Update {
        let address = &advertisement.address;
        self.emit(Event::AdvertisementReceived {
            address: address.clone(),
            name: advertisement.name.clone(),
            rssi: advertisement.rssi,
        });

        if advertisement.manufacturer_data.is_empty() {
            self.emit(Event::NoManufacturerData {
                address: address.clone(),
            });
        }

        let decoding = decoder::inspect(advertisement);
        for (company_id, err) in decoding.rejected_entries {
            self.emit(Event::EntryRejected {
                address: address.clone(),
                company_id,
                reason: EntryRejection::Payload(err),
            });
        }

        let Some(reading) = decoding.reading else {
            self.emit(Event::NoTemperature {
                address: address.clone(),
            });
            return Update::NoReading;
        };

        self.emit(Event::TemperatureDecoded {
            address: address.clone(),
            raw: reading.raw,
            celsius: reading.celsius,
        });

        if !is_plausible(reading.celsius) {
            self.emit(Event::TemperatureOutOfRange {
                address: address.clone(),
                celsius: reading.celsius,
            });
            return Update::OutOfRange(reading.celsius);
        }

        let value = round_tenth(reading.celsius);
        self.value = Some(value);
        Update::Accepted(value)
    }

    /// Snapshot of the current state, if there is one.
    pub fn measurement(&self) -> Option<Measurement> {
        self.value.map(|temperature| Measurement {
            device: self.config.identity.clone(),
            name: self.config.name.clone(),
            timestamp: SystemTime::now(),
            temperature,
        })
    }

    fn emit(&self, event: Event) {
        self.observer.on_event(&event);
    }
}

impl std::fmt::Debug for TemperatureSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemperatureSensor")
            .field("config", &self.config)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::recording::RecordingObserver;
    use crate::payload::PayloadError;
    use crate::test_utils::{TEST_MAC, payload_with_raw, salter_advertisement};

    fn sensor() -> (TemperatureSensor, RecordingObserver) {
        let observer = RecordingObserver::default();
        let config = DeviceConfig::new(&TEST_MAC.to_string(), Some("Kitchen"));
        (
            TemperatureSensor::new(config, Arc::new(observer.clone())),
            observer,
        )
    }

    #[test]
    fn test_plausibility_bounds_are_exclusive() {
        assert!(!is_plausible(-50.0));
        assert!(is_plausible(-49.9));
        assert!(is_plausible(99.9));
        assert!(!is_plausible(100.0));
        assert!(!is_plausible(f64::NAN));
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(21.54), 21.5);
        assert_eq!(round_tenth(21.56), 21.6);
        assert_eq!(round_tenth(99.9), 99.9);
        assert_eq!(round_tenth(-49.9), -49.9);
    }

    #[test]
    fn test_metadata() {
        let (sensor, _) = sensor();
        assert_eq!(sensor.unique_id(), "salter_AABBCCDDEEFF_temp");
        assert_eq!(sensor.name(), "Kitchen");
        assert_eq!(sensor.identity().as_str(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(sensor.native_value(), None);
        assert!(sensor.measurement().is_none());
        assert_eq!(
            (UNIT_OF_MEASUREMENT, DEVICE_CLASS, STATE_CLASS),
            ("°C", "temperature", "measurement")
        );
    }

    #[test]
    fn test_accepts_plausible_reading() {
        let (mut sensor, observer) = sensor();
        assert_eq!(sensor.handle(&salter_advertisement(100)), Update::Accepted(10.0));
        assert_eq!(sensor.native_value(), Some(10.0));

        let measurement = sensor.measurement().unwrap();
        assert_eq!(measurement.temperature, 10.0);
        assert_eq!(measurement.name, "Kitchen");

        let events = observer.events();
        assert!(events.contains(&Event::TemperatureDecoded {
            address: TEST_MAC.to_string(),
            raw: 100,
            celsius: 10.0,
        }));
    }

    #[test]
    fn test_boundary_reading_keeps_previous_value() {
        let (mut sensor, observer) = sensor();
        sensor.handle(&salter_advertisement(215));

        assert_eq!(
            sensor.handle(&salter_advertisement(1000)),
            Update::OutOfRange(100.0)
        );
        assert_eq!(sensor.native_value(), Some(21.5));
        assert!(observer.events().contains(&Event::TemperatureOutOfRange {
            address: TEST_MAC.to_string(),
            celsius: 100.0,
        }));

        assert_eq!(
            sensor.handle(&salter_advertisement(999)),
            Update::Accepted(99.9)
        );
    }

    #[test]
    fn test_undecodable_advertisement_keeps_previous_value() {
        let (mut sensor, observer) = sensor();
        sensor.handle(&salter_advertisement(215));

        let mut bad = payload_with_raw(300);
        bad[0] = 0x00;
        let adv = Advertisement::new(TEST_MAC.to_string()).with_manufacturer_data(7, bad);
        assert_eq!(sensor.handle(&adv), Update::NoReading);
        assert_eq!(sensor.native_value(), Some(21.5));

        let events = observer.events();
        assert!(events.contains(&Event::EntryRejected {
            address: TEST_MAC.to_string(),
            company_id: 7,
            reason: EntryRejection::Payload(PayloadError::HeaderMismatch([0x00, 0x01, 0x01])),
        }));
        assert_eq!(
            events.last(),
            Some(&Event::NoTemperature {
                address: TEST_MAC.to_string()
            })
        );
    }

    #[test]
    fn test_empty_advertisement_reports_missing_data() {
        let (mut sensor, observer) = sensor();
        let adv = Advertisement::new(TEST_MAC.to_string()).with_rssi(-71);
        assert_eq!(sensor.handle(&adv), Update::NoReading);
        assert_eq!(
            observer.events(),
            vec![
                Event::AdvertisementReceived {
                    address: TEST_MAC.to_string(),
                    name: None,
                    rssi: Some(-71),
                },
                Event::NoManufacturerData {
                    address: TEST_MAC.to_string()
                },
                Event::NoTemperature {
                    address: TEST_MAC.to_string()
                },
            ]
        );
    }
}
