//! BLE advertisement source.
//!
//! A scanner delivers every advertisement it sees as an [`Advertisement`]
//! on a bounded channel. It does not classify or decode anything.

#[cfg(feature = "bluer")]
pub mod bluer;

use crate::advertisement::Advertisement;
use thiserror::Error;
use tokio::sync::mpsc;

/// Error type for scanner operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Bluetooth/adapter related error
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),
    /// No scanning backend compiled in
    #[error("no Bluetooth backend available (built without the `bluer` feature)")]
    BackendNotAvailable,
}

/// Channel buffer size for received advertisements.
pub const ADVERTISEMENT_CHANNEL_BUFFER_SIZE: usize = 100;

/// Start scanning on `adapter` (the default adapter when `None`).
///
/// Runs until the returned receiver is dropped.
pub async fn start_scan(
    adapter: Option<String>,
) -> Result<mpsc::Receiver<Advertisement>, ScanError> {
    #[cfg(feature = "bluer")]
    return bluer::start_scan(adapter).await;

    #[cfg(not(feature = "bluer"))]
    {
        let _ = adapter;
        Err(ScanError::BackendNotAvailable)
    }
}
