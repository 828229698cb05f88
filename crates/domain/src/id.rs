//! Record identifiers: one UUID newtype per stored entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;

/// Text that cannot be parsed as a record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {entity} id {input:?}")]
pub struct MalformedId {
    pub entity: &'static str,
    pub input: String,
}

impl From<MalformedId> for NotFoundError {
    fn from(err: MalformedId) -> Self {
        Self {
            entity: err.entity,
            id: err.input,
        }
    }
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident => $entity:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Entity name used in not-found and parse errors.
            pub const ENTITY: &'static str = $entity;

            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = MalformedId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim()).map(Self).map_err(|_| MalformedId {
                    entity: $entity,
                    input: s.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId => "User"
);

define_id!(
    /// Unique identifier for a [`Hub`](crate::hub::Hub).
    HubId => "Hub"
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId => "Device"
);

define_id!(
    /// Unique identifier for a [`Group`](crate::group::Group).
    GroupId => "Group"
);

define_id!(
    /// Unique identifier for an [`Automation`](crate::automation::Automation).
    AutomationId => "Automation"
);
