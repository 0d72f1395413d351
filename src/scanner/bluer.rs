//! BlueZ D-Bus scanner backend.
//!
//! Uses the `bluer` crate to talk to the BlueZ daemon, so `bluetoothd` must
//! be running. Discovery runs with duplicate reporting enabled; BlueZ then
//! signals a property change for every advertisement a device sends, and
//! each one is turned into an [`Advertisement`].

use super::{ADVERTISEMENT_CHANNEL_BUFFER_SIZE, ScanError};
use crate::advertisement::{Advertisement, ManufacturerData};
use crate::mac_address::MacAddress;
use bluer::{Adapter, AdapterEvent, Address, DiscoveryFilter, DiscoveryTransport, Session};
use futures::{StreamExt, pin_mut};
use tokio::sync::mpsc;

impl From<bluer::Error> for ScanError {
    fn from(err: bluer::Error) -> Self {
        ScanError::Bluetooth(err.to_string())
    }
}

/// Power the adapter on and start LE discovery.
///
/// Advertisements are sent through the returned channel until it is dropped.
pub async fn start_scan(
    adapter_name: Option<String>,
) -> Result<mpsc::Receiver<Advertisement>, ScanError> {
    let session = Session::new().await?;
    let adapter = match adapter_name {
        Some(name) => session.adapter(&name)?,
        None => session.default_adapter().await?,
    };
    adapter.set_powered(true).await?;
    adapter
        .set_discovery_filter(DiscoveryFilter {
            transport: DiscoveryTransport::Le,
            duplicate_data: true,
            ..Default::default()
        })
        .await?;

    let events = adapter.discover_devices_with_changes().await?;
    tracing::info!(adapter = adapter.name(), "BLE discovery started");

    let (tx, rx) = mpsc::channel(ADVERTISEMENT_CHANNEL_BUFFER_SIZE);

    // The task owns the session; discovery stops when it ends.
    tokio::spawn(async move {
        let _session = session;
        pin_mut!(events);

        while let Some(event) = events.next().await {
            let AdapterEvent::DeviceAdded(address) = event else {
                continue;
            };

            match read_advertisement(&adapter, address).await {
                Ok(advertisement) => {
                    if tx.send(advertisement).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::debug!(%address, error = %e, "failed to read device properties"),
            }
        }

        tracing::info!(adapter = adapter.name(), "BLE discovery stopped");
    });

    Ok(rx)
}

/// Snapshot the advertised properties BlueZ cached for a device.
async fn read_advertisement(adapter: &Adapter, address: Address) -> Result<Advertisement, ScanError> {
    let device = adapter.device(address)?;

    let manufacturer_data: ManufacturerData = device
        .manufacturer_data()
        .await?
        .map(|data| data.into_iter().collect())
        .unwrap_or_default();

    Ok(Advertisement {
        name: device.name().await?,
        address: MacAddress::from(address).to_string(),
        rssi: device.rssi().await?,
        manufacturer_data,
    })
}
