//! Address-scoped advertisement subscription.
//!
//! Registering a sensor spawns a task that feeds it every advertisement from
//! its address and forwards accepted readings. The returned [`Subscription`]
//! owns the cancellation handle: cancelling or dropping it unregisters the
//! sensor.

use crate::advertisement::Advertisement;
use crate::measurement::Measurement;
use crate::observer::Event;
use crate::sensor::{TemperatureSensor, Update};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub struct Subscription {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<TemperatureSensor>>,
}

impl Subscription {
    /// Start delivering `advertisements` to `sensor`.
    ///
    /// Advertisements from other addresses are ignored. Each accepted reading
    /// is sent to `readings`. The task ends when cancelled or when the
    /// advertisement stream closes.
    pub fn register(
        sensor: TemperatureSensor,
        advertisements: mpsc::Receiver<Advertisement>,
        readings: mpsc::Sender<Measurement>,
    ) -> Self {
        let (cancel, cancelled) = oneshot::channel();
        let task = tokio::spawn(listen(sensor, advertisements, readings, cancelled));

        Self {
            cancel: Some(cancel),
            task: Some(task),
        }
    }

    /// Stop listening and hand the sensor back with its last state.
    ///
    /// Returns `None` if the listening task panicked.
    pub async fn unregister(mut self) -> Option<TemperatureSensor> {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        let task = self.task.take()?;
        task.await.ok()
    }

    /// Wait for the advertisement stream to end without cancelling.
    pub async fn finished(mut self) -> Option<TemperatureSensor> {
        let task = self.task.take()?;
        let sensor = task.await.ok();
        // nothing left to cancel
        self.cancel.take();
        sensor
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

async fn listen(
    mut sensor: TemperatureSensor,
    mut advertisements: mpsc::Receiver<Advertisement>,
    readings: mpsc::Sender<Measurement>,
    mut cancelled: oneshot::Receiver<()>,
) -> TemperatureSensor {
    let address = sensor.identity().to_string();
    sensor.observer().on_event(&Event::ListeningStarted {
        address: address.clone(),
    });

    loop {
        tokio::select! {
            biased;
            _ = &mut cancelled => break,
            received = advertisements.recv() => {
                let Some(advertisement) = received else { break };
                if !sensor.identity().matches(&advertisement.address) {
                    continue;
                }
                if let Update::Accepted(_) = sensor.handle(&advertisement)
                    && let Some(measurement) = sensor.measurement()
                    && readings.send(measurement).await.is_err()
                {
                    break;
                }
            }
        }
    }

    sensor
        .observer()
        .on_event(&Event::ListeningStopped { address });
    sensor
}
