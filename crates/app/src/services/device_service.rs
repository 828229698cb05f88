//! Device service — use-cases for announcing, adopting and editing devices.

use hubdesk_domain::device::{Device, DeviceStatus, DeviceType, DeviceUpdate, NearbyQuery};
use hubdesk_domain::error::{HubdeskError, NotFoundError, ValidationError};
use hubdesk_domain::id::DeviceId;

use crate::ports::{DeviceRepository, HubRepository};

/// Application service for device CRUD.
///
/// Holds the hub repository as well so that the hub a device names can be
/// checked before the device is written.
pub struct DeviceService<D, H> {
    devices: D,
    hubs: H,
}

impl<D: DeviceRepository, H: HubRepository> DeviceService<D, H> {
    /// Create a new service backed by the given repositories.
    pub fn new(devices: D, hubs: H) -> Self {
        Self { devices, hubs }
    }

    /// Record a device a hub has discovered; it starts `unregistered`.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `address` or `hub` is empty,
    /// [`HubdeskError::NotFound`] if the hub does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn register(
        &self,
        address: &str,
        hub: &str,
        device_type: Option<DeviceType>,
    ) -> Result<Device, HubdeskError> {
        self.create(address, hub, device_type, DeviceStatus::Unregistered)
            .await
    }

    /// Adopt a device on `hub`; it starts `registered`.
    ///
    /// # Errors
    ///
    /// Same as [`DeviceService::register`].
    #[tracing::instrument(skip(self))]
    pub async fn add(
        &self,
        hub: &str,
        address: &str,
        device_type: Option<DeviceType>,
    ) -> Result<Device, HubdeskError> {
        self.create(address, hub, device_type, DeviceStatus::Registered)
            .await
    }

    async fn create(
        &self,
        address: &str,
        hub: &str,
        device_type: Option<DeviceType>,
        status: DeviceStatus,
    ) -> Result<Device, HubdeskError> {
        let mut builder = Device::builder().address(address).hub(hub).status(status);
        if let Some(kind) = device_type {
            builder = builder.device_type(kind);
        }
        let device = builder.build()?;
        self.require_hub(&device.hub).await?;
        let device = self.devices.create(device).await?;
        tracing::info!(device_id = %device.id, hub = %device.hub, status = %device.status, "device created");
        Ok(device)
    }

    async fn require_hub(&self, name: &str) -> Result<(), HubdeskError> {
        match self.hubs.find_by_name(name).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Hub",
                id: name.to_string(),
            }
            .into()),
        }
    }

    /// Devices on a hub that nobody has adopted yet.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when the query names no hub, or a
    /// storage error.
    pub async fn list_nearby(&self, query: &NearbyQuery) -> Result<Vec<Device>, HubdeskError> {
        if query.hub.trim().is_empty() {
            return Err(ValidationError::EmptyHub.into());
        }
        let devices = self.devices.find_by_hub(&query.hub).await?;
        Ok(devices.into_iter().filter(|d| query.matches(d)).collect())
    }

    /// Every device attached to `hub`, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHub`] when `hub` is empty, or a storage error.
    pub async fn list_all(&self, hub: &str) -> Result<Vec<Device>, HubdeskError> {
        if hub.trim().is_empty() {
            return Err(ValidationError::EmptyHub.into());
        }
        self.devices.find_by_hub(hub).await
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when no device with `id` exists.
    pub async fn get(&self, id: DeviceId) -> Result<Device, HubdeskError> {
        self.devices.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Apply a partial update and bump `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the device does not exist,
    /// [`HubdeskError::Validation`] if the result is invalid, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: DeviceId, update: DeviceUpdate) -> Result<Device, HubdeskError> {
        let mut device = self.get(id).await?;
        device.apply(update)?;
        self.devices.update(device).await
    }

    /// Delete a device. Group and automation lists keep any reference to it.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the device does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: DeviceId) -> Result<(), HubdeskError> {
        self.get(id).await?;
        self.devices.delete(id).await?;
        tracing::info!(device_id = %id, "device deleted");
        Ok(())
    }
}
