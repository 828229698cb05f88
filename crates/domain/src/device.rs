//! Device — an addressable endpoint belonging to exactly one hub.

use serde::{Deserialize, Serialize};

use crate::error::{HubdeskError, ValidationError};
use crate::id::DeviceId;
use crate::macros::define_open_enum;
use crate::time::{Timestamp, now};

define_open_enum!(
    /// Lifecycle status of a device.
    DeviceStatus {
        /// Announced by its hub but not yet adopted by a user.
        Unregistered => "unregistered",
        /// Adopted by a user.
        Registered => "registered",
        Online => "online",
        Offline => "offline",
    }
);

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::Unregistered
    }
}

define_open_enum!(
    /// Kind of hardware behind a device.
    DeviceType {
        Sensor => "sensor",
        Switch => "switch",
        Light => "light",
        Thermostat => "thermostat",
        Camera => "camera",
        Lock => "lock",
    }
);

/// A device attached to a hub.
///
/// `hub` holds the hub name (its wire identity), not the hub's store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(rename = "deviceID")]
    pub id: DeviceId,
    pub address: String,
    pub hub: String,
    pub groups: Vec<String>,
    pub status: DeviceStatus,
    pub device_type: DeviceType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when:
    /// - `address` is empty ([`ValidationError::EmptyAddress`])
    /// - `hub` is empty ([`ValidationError::EmptyHub`])
    pub fn validate(&self) -> Result<(), HubdeskError> {
        if self.address.trim().is_empty() {
            return Err(ValidationError::EmptyAddress.into());
        }
        if self.hub.trim().is_empty() {
            return Err(ValidationError::EmptyHub.into());
        }
        Ok(())
    }

    /// Apply a partial update, bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, update: DeviceUpdate) -> Result<(), HubdeskError> {
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(device_type) = update.device_type {
            self.device_type = device_type;
        }
        if let Some(groups) = update.groups {
            self.groups = normalize_groups(groups);
        }
        self.updated_at = now();
        self.validate()
    }
}

/// Group names are a set: blanks are dropped and first occurrence wins.
fn normalize_groups(groups: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(groups.len());
    for name in groups {
        let name = name.trim().to_string();
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Fields that may change on an existing device. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceUpdate {
    pub address: Option<String>,
    pub status: Option<DeviceStatus>,
    pub device_type: Option<DeviceType>,
    pub groups: Option<Vec<String>>,
}

impl DeviceUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.status.is_none()
            && self.device_type.is_none()
            && self.groups.is_none()
    }
}

/// Filter for devices a hub can see but nobody has adopted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub hub: String,
    pub address_prefix: Option<String>,
    pub device_type: Option<DeviceType>,
}

impl NearbyQuery {
    /// Whether `device` is nearby according to this query.
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        device.hub == self.hub
            && device.status == DeviceStatus::Unregistered
            && self
                .address_prefix
                .as_deref()
                .is_none_or(|prefix| device.address.starts_with(prefix))
            && self
                .device_type
                .as_ref()
                .is_none_or(|kind| &device.device_type == kind)
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    address: Option<String>,
    hub: Option<String>,
    groups: Vec<String>,
    status: Option<DeviceStatus>,
    device_type: Option<DeviceType>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<DeviceType>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, ts: Timestamp) -> Self {
        self.updated_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `address` or `hub` is missing.
    pub fn build(self) -> Result<Device, HubdeskError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let device = Device {
            id: self.id.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            hub: self.hub.unwrap_or_default(),
            groups: normalize_groups(self.groups),
            status: self.status.unwrap_or_default(),
            device_type: self
                .device_type
                .unwrap_or_else(|| DeviceType::Other(String::new())),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        device.validate()?;
        Ok(device)
    }
}
