//! Setup gate: turns a discovered advertisement or a manually entered
//! address into a configured device.

use crate::advertisement::Advertisement;
use crate::classifier;
use crate::device::{DeviceConfig, DeviceIdentity};
use crate::observer::{Event, Observer};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Reasons setup is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("not_supported: {0} is not a Salter thermometer")]
    NotSupported(String),
    #[error("already_configured: {0}")]
    AlreadyConfigured(DeviceIdentity),
    #[error("missing address")]
    MissingAddress,
}

/// Manually entered device details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub address: String,
    pub name: Option<String>,
}

/// Tracks configured identities and admits new devices.
pub struct SetupFlow {
    configured: BTreeSet<DeviceIdentity>,
    observer: Arc<dyn Observer>,
}

impl SetupFlow {
    pub fn new(observer: Arc<dyn Observer>) -> Self {
        Self {
            configured: BTreeSet::new(),
            observer,
        }
    }

    /// Discovery step. Classifies the advertisement and, if supported,
    /// configures it under its address with the broadcast name as title.
    pub fn discovered(&mut self, advertisement: &Advertisement) -> Result<DeviceConfig, SetupError> {
        let address = &advertisement.address;
        let classification = classifier::inspect(advertisement);

        for (company_id, reason) in &classification.rejected_entries {
            self.observer.on_event(&Event::EntryRejected {
                address: address.clone(),
                company_id: *company_id,
                reason: *reason,
            });
        }

        let Some(matched) = classification.matched else {
            self.observer.on_event(&Event::DeviceNotSupported {
                address: address.clone(),
            });
            return Err(SetupError::NotSupported(address.clone()));
        };

        let config = DeviceConfig::new(address, advertisement.name.as_deref());
        if self.configured.contains(&config.identity) {
            return Err(SetupError::AlreadyConfigured(config.identity));
        }

        self.observer.on_event(&Event::DeviceSupported {
            address: config.identity.to_string(),
            matched,
        });
        self.create(config)
    }

    /// Manual step. The address is taken on trust; no classification.
    pub fn user(&mut self, input: UserInput) -> Result<DeviceConfig, SetupError> {
        if input.address.trim().is_empty() {
            return Err(SetupError::MissingAddress);
        }
        self.create(DeviceConfig::new(&input.address, input.name.as_deref()))
    }

    pub fn is_configured(&self, identity: &DeviceIdentity) -> bool {
        self.configured.contains(identity)
    }

    fn create(&mut self, config: DeviceConfig) -> Result<DeviceConfig, SetupError> {
        if !self.configured.insert(config.identity.clone()) {
            return Err(SetupError::AlreadyConfigured(config.identity));
        }
        Ok(config)
    }
}
