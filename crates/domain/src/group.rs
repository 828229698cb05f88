//! Group — a named, mutable list of device references for batch operations.

use serde::{Deserialize, Serialize};

use crate::error::{HubdeskError, ValidationError};
use crate::id::{DeviceId, GroupId};
use crate::time::{Timestamp, now};

/// A named set of device references.
///
/// Membership is a plain list: adding the same device twice records it
/// twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "groupID")]
    pub id: GroupId,
    pub name: String,
    pub devices: Vec<DeviceId>,
    pub created_at: Timestamp,
}

impl Group {
    /// Create an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HubdeskError> {
        let group = Self {
            id: GroupId::new(),
            name: name.into(),
            devices: Vec::new(),
            created_at: now(),
        };
        group.validate()?;
        Ok(group)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HubdeskError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Append a member.
    pub fn add_device(&mut self, device: DeviceId) {
        self.devices.push(device);
    }

    /// Drop every occurrence of `device`, returning how many were removed.
    pub fn remove_device(&mut self, device: DeviceId) -> usize {
        let before = self.devices.len();
        self.devices.retain(|member| *member != device);
        before - self.devices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_empty_group() {
        let group = Group::new("Kitchen").unwrap();
        assert_eq!(group.name, "Kitchen");
        assert!(group.devices.is_empty());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        assert!(matches!(
            Group::new(""),
            Err(HubdeskError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_keep_duplicate_members() {
        let mut group = Group::new("Kitchen").unwrap();
        let device = DeviceId::new();
        group.add_device(device);
        group.add_device(device);
        assert_eq!(group.devices, vec![device, device]);
    }

    #[test]
    fn should_remove_every_occurrence() {
        let mut group = Group::new("Kitchen").unwrap();
        let device = DeviceId::new();
        let other = DeviceId::new();
        group.add_device(device);
        group.add_device(other);
        group.add_device(device);

        assert_eq!(group.remove_device(device), 2);
        assert_eq!(group.devices, vec![other]);
    }

    #[test]
    fn should_treat_removing_non_member_as_noop() {
        let mut group = Group::new("Kitchen").unwrap();
        assert_eq!(group.remove_device(DeviceId::new()), 0);
        assert!(group.devices.is_empty());
    }

    #[test]
    fn should_serialize_with_group_id_field() {
        let group = Group::new("Kitchen").unwrap();
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["groupID"], group.id.to_string());
        assert_eq!(json["devices"], serde_json::json!([]));
    }
}
