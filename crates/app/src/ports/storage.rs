//! Storage port — repository traits for the device-management records.
//!
//! Every method is a single store round-trip. Repositories do not check
//! references between records; services look those up before writing.

use std::future::Future;

use hubdesk_domain::automation::Automation;
use hubdesk_domain::device::Device;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::group::Group;
use hubdesk_domain::hub::Hub;
use hubdesk_domain::id::{AutomationId, DeviceId, GroupId, HubId, UserId};

/// Repository for persisting and querying [`Hub`]s.
pub trait HubRepository {
    /// Create a new hub in storage.
    fn create(&self, hub: Hub) -> impl Future<Output = Result<Hub, HubdeskError>> + Send;

    /// Get a hub by its unique identifier.
    fn get_by_id(
        &self,
        id: HubId,
    ) -> impl Future<Output = Result<Option<Hub>, HubdeskError>> + Send;

    /// Get a hub by its name (the identity devices refer to).
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Hub>, HubdeskError>> + Send;

    /// Get all hubs.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Hub>, HubdeskError>> + Send;

    /// Get the hubs owned by `owner`.
    fn find_by_owner(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<Hub>, HubdeskError>> + Send;

    /// Update an existing hub.
    fn update(&self, hub: Hub) -> impl Future<Output = Result<Hub, HubdeskError>> + Send;

    /// Delete a hub by its unique identifier.
    fn delete(&self, id: HubId) -> impl Future<Output = Result<(), HubdeskError>> + Send;
}

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Create a new device in storage.
    fn create(&self, device: Device)
    -> impl Future<Output = Result<Device, HubdeskError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HubdeskError>> + Send;

    /// Get all devices attached to the hub named `hub`, oldest first.
    fn find_by_hub(
        &self,
        hub: &str,
    ) -> impl Future<Output = Result<Vec<Device>, HubdeskError>> + Send;

    /// Update an existing device.
    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, HubdeskError>> + Send;

    /// Delete a device by its unique identifier.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HubdeskError>> + Send;
}

/// Repository for persisting and querying [`Group`]s.
pub trait GroupRepository {
    /// Create a new group in storage.
    fn create(&self, group: Group) -> impl Future<Output = Result<Group, HubdeskError>> + Send;

    /// Get a group by its unique identifier.
    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, HubdeskError>> + Send;

    /// Get all groups.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Group>, HubdeskError>> + Send;

    /// Replace an existing group, including its member list.
    fn update(&self, group: Group) -> impl Future<Output = Result<Group, HubdeskError>> + Send;

    /// Delete a group by its unique identifier.
    fn delete(&self, id: GroupId) -> impl Future<Output = Result<(), HubdeskError>> + Send;
}

/// Repository for persisting and querying [`Automation`]s.
pub trait AutomationRepository {
    /// Create a new automation in storage.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, HubdeskError>> + Send;

    /// Get an automation by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, HubdeskError>> + Send;

    /// Get all automations.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, HubdeskError>> + Send;

    /// Replace an existing automation, including its directive list.
    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, HubdeskError>> + Send;

    /// Delete an automation by its unique identifier.
    fn delete(&self, id: AutomationId)
    -> impl Future<Output = Result<(), HubdeskError>> + Send;
}
