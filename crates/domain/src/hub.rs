//! Hub — a physical coordinator that devices attach to.
//!
//! A hub is identified on the wire by its `name`: devices and automations
//! store the hub name in their `hub` field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{HubdeskError, ValidationError};
use crate::id::{HubId, UserId};
use crate::time::{Timestamp, now};

/// Firmware version assumed for hubs that never reported one.
pub const UNKNOWN_FIRMWARE: &str = "0.0.0";

/// A coordinating node managing one or more devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    #[serde(rename = "hubID")]
    pub id: HubId,
    pub name: String,
    pub address: String,
    #[serde(rename = "ownerID")]
    pub owner: Option<UserId>,
    pub firmware_version: String,
    pub created_at: Timestamp,
}

impl Hub {
    /// Create a builder for constructing a [`Hub`].
    #[must_use]
    pub fn builder() -> HubBuilder {
        HubBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when `name` or `address` is empty.
    pub fn validate(&self) -> Result<(), HubdeskError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::EmptyAddress.into());
        }
        Ok(())
    }

    /// Whether `user` may administer this hub.
    ///
    /// Unowned hubs (self-registered) may be administered by anyone.
    #[must_use]
    pub fn is_manageable_by(&self, user: Option<UserId>) -> bool {
        match self.owner {
            None => true,
            Some(owner) => user == Some(owner),
        }
    }
}

/// Step-by-step builder for [`Hub`].
#[derive(Debug, Default)]
pub struct HubBuilder {
    id: Option<HubId>,
    name: Option<String>,
    address: Option<String>,
    owner: Option<UserId>,
    firmware_version: Option<String>,
    created_at: Option<Timestamp>,
}

impl HubBuilder {
    #[must_use]
    pub fn id(mut self, id: HubId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Hub`].
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `name` or `address` is missing.
    pub fn build(self) -> Result<Hub, HubdeskError> {
        let hub = Hub {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            owner: self.owner,
            firmware_version: self
                .firmware_version
                .unwrap_or_else(|| UNKNOWN_FIRMWARE.to_string()),
            created_at: self.created_at.unwrap_or_else(now),
        };
        hub.validate()?;
        Ok(hub)
    }
}

/// Result of asking whether newer firmware exists for a hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheck {
    #[serde(rename = "hubID")]
    pub hub_id: HubId,
    pub current_version: String,
    pub latest_version: String,
    pub update_available: bool,
}

impl UpdateCheck {
    /// Compare the hub's firmware against `latest`.
    #[must_use]
    pub fn evaluate(hub: &Hub, latest: impl Into<String>) -> Self {
        let latest = latest.into();
        let update_available =
            compare_versions(&latest, &hub.firmware_version) == Ordering::Greater;
        Self {
            hub_id: hub.id,
            current_version: hub.firmware_version.clone(),
            latest_version: latest,
            update_available,
        }
    }
}

/// Compare dotted version strings component by component.
///
/// Missing components count as zero and non-numeric components compare
/// lexically, so `1.2` == `1.2.0` and `1.10` > `1.9`.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let split = |v: &str| -> Vec<String> {
        v.trim()
            .trim_start_matches('v')
            .split('.')
            .map(str::to_string)
            .collect()
    };
    let (l, r) = (split(left), split(right));
    let len = l.len().max(r.len());
    for idx in 0..len {
        let a = l.get(idx).map_or("0", String::as_str);
        let b = r.get(idx).map_or("0", String::as_str);
        let ord = match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => a.cmp(b),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
