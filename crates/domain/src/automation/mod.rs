//! Automation — a named set of device/setting directives.
//!
//! An automation belongs to a hub and is dispatched as a batch: every
//! [`Directive`] is sent, in list order, to the device it names.

mod directive;
mod dispatch;

pub use directive::{Directive, Setting};
pub use dispatch::{DispatchOutcome, DispatchReport, DispatchStatus};

use serde::{Deserialize, Serialize};

use crate::error::{HubdeskError, ValidationError};
use crate::id::{AutomationId, DeviceId};
use crate::time::{Timestamp, now};

/// A batch of directives dispatchable through a hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    #[serde(rename = "automationID")]
    pub id: AutomationId,
    pub name: String,
    pub hub: String,
    pub directives: Vec<Directive>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `hub` is empty ([`ValidationError::EmptyHub`])
    pub fn validate(&self) -> Result<(), HubdeskError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.hub.trim().is_empty() {
            return Err(ValidationError::EmptyHub.into());
        }
        Ok(())
    }

    /// Append a directive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySetting`] when the setting is blank.
    pub fn add_directive(
        &mut self,
        device: DeviceId,
        setting: Setting,
    ) -> Result<(), HubdeskError> {
        if setting.as_str().trim().is_empty() {
            return Err(ValidationError::EmptySetting.into());
        }
        self.directives.push(Directive { device, setting });
        self.updated_at = now();
        Ok(())
    }

    /// Drop every directive aimed at `device`, returning how many were removed.
    pub fn remove_device(&mut self, device: DeviceId) -> usize {
        let before = self.directives.len();
        self.directives.retain(|d| d.device != device);
        let removed = before - self.directives.len();
        if removed > 0 {
            self.updated_at = now();
        }
        removed
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    hub: Option<String>,
    directives: Vec<Directive>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    #[must_use]
    pub fn directive(mut self, device: DeviceId, setting: impl Into<Setting>) -> Self {
        self.directives.push(Directive {
            device,
            setting: setting.into(),
        });
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

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `name` or `hub` is missing.
    pub fn build(self) -> Result<Automation, HubdeskError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            hub: self.hub.unwrap_or_default(),
            directives: self.directives,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        automation.validate()?;
        Ok(automation)
    }
}
