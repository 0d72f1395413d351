//! `salter-listener` library.
//!
//! The binary (`src/main.rs`) is responsible for CLI parsing, logging setup
//! and process exit codes. Advertisement classification lives in
//! [`crate::classifier`], temperature decoding in [`crate::decoder`]; both are
//! pure functions over an [`Advertisement`]. [`crate::app`] wires them to a
//! scanner and an output stream.

pub mod advertisement;
pub mod app;
pub mod classifier;
pub mod decoder;
pub mod device;
pub mod logging;
pub mod mac_address;
pub mod measurement;
pub mod observer;
pub mod output;
pub mod payload;
pub mod scanner;
pub mod sensor;
pub mod setup;
pub mod subscription;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use advertisement::{Advertisement, ManufacturerData};
pub use classifier::classify;
pub use decoder::decode;
pub use device::{DeviceConfig, DeviceIdentity};
pub use mac_address::MacAddress;
pub use measurement::Measurement;
pub use observer::{Event, Observer, TracingObserver};
pub use output::OutputFormatter;
pub use output::influxdb::InfluxDbFormatter;
pub use payload::{PayloadError, SalterPayload, parse_payload};
pub use scanner::ScanError;
pub use sensor::{TemperatureSensor, Update, is_plausible};
pub use setup::{SetupError, SetupFlow, UserInput};
pub use subscription::Subscription;
