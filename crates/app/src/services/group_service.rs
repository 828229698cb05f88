//! Group service — use-cases for named device collections.

use hubdesk_domain::error::{HubdeskError, NotFoundError};
use hubdesk_domain::group::Group;
use hubdesk_domain::id::{DeviceId, GroupId};

use crate::ports::{DeviceRepository, GroupRepository};

/// Application service for group CRUD and membership.
pub struct GroupService<G, D> {
    groups: G,
    devices: D,
}

impl<G: GroupRepository, D: DeviceRepository> GroupService<G, D> {
    /// Create a new service backed by the given repositories.
    pub fn new(groups: G, devices: D) -> Self {
        Self { groups, devices }
    }

    /// Create an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `name` is empty, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<Group, HubdeskError> {
        let group = Group::new(name)?;
        self.groups.create(group).await
    }

    /// List every group.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_all(&self) -> Result<Vec<Group>, HubdeskError> {
        self.groups.get_all().await
    }

    /// Look up a group by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when no group with `id` exists.
    pub async fn get(&self, id: GroupId) -> Result<Group, HubdeskError> {
        self.groups.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Group",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Append `device` to the group. Adding a member twice records it twice.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if either the group or the device
    /// does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(&self, id: GroupId, device: DeviceId) -> Result<Group, HubdeskError> {
        let mut group = self.get(id).await?;
        if self.devices.get_by_id(device).await?.is_none() {
            return Err(NotFoundError {
                entity: "Device",
                id: device.to_string(),
            }
            .into());
        }
        group.add_device(device);
        self.groups.update(group).await
    }

    /// Remove every occurrence of `device`; absent members are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the group does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_device(
        &self,
        id: GroupId,
        device: DeviceId,
    ) -> Result<Group, HubdeskError> {
        let mut group = self.get(id).await?;
        if group.remove_device(device) == 0 {
            return Ok(group);
        }
        self.groups.update(group).await
    }

    /// Delete a group.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the group does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: GroupId) -> Result<(), HubdeskError> {
        self.get(id).await?;
        self.groups.delete(id).await
    }
}
