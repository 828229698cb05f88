//! Dispatch report — per-directive outcome of sending an automation.

use serde::{Deserialize, Serialize};

use crate::id::{AutomationId, DeviceId};

use super::Setting;

/// Whether a directive reached its device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchStatus {
    Delivered,
    Failed { reason: String },
}

/// Outcome of one directive, in the order it was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    #[serde(rename = "deviceID")]
    pub device: DeviceId,
    pub setting: Setting,
    #[serde(flatten)]
    pub status: DispatchStatus,
}

/// Result of dispatching every directive of an automation.
///
/// Dispatch is best-effort: a failed directive does not stop the ones after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    #[serde(rename = "automationID")]
    pub automation_id: AutomationId,
    pub delivered: usize,
    pub failed: usize,
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// Start an empty report.
    #[must_use]
    pub fn new(automation_id: AutomationId) -> Self {
        Self {
            automation_id,
            delivered: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    /// Record a delivered directive.
    pub fn delivered(&mut self, device: DeviceId, setting: Setting) {
        self.delivered += 1;
        self.outcomes.push(DispatchOutcome {
            device,
            setting,
            status: DispatchStatus::Delivered,
        });
    }

    /// Record a failed directive.
    pub fn failed(&mut self, device: DeviceId, setting: Setting, reason: impl Into<String>) {
        self.failed += 1;
        self.outcomes.push(DispatchOutcome {
            device,
            setting,
            status: DispatchStatus::Failed {
                reason: reason.into(),
            },
        });
    }

    /// Whether every directive was delivered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_count_outcomes() {
        let mut report = DispatchReport::new(AutomationId::new());
        report.delivered(DeviceId::new(), Setting::On);
        report.failed(DeviceId::new(), Setting::Off, "hub offline");

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.is_complete());
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn should_report_complete_when_nothing_to_send() {
        let report = DispatchReport::new(AutomationId::new());
        assert!(report.is_complete());
    }

    #[test]
    fn should_flatten_status_into_outcome_json() {
        let device = DeviceId::new();
        let mut report = DispatchReport::new(AutomationId::new());
        report.failed(device, Setting::On, "device not found");

        let json = serde_json::to_value(&report).unwrap();
        let outcome = &json["outcomes"][0];
        assert_eq!(outcome["deviceID"], device.to_string());
        assert_eq!(outcome["status"], "failed");
        assert_eq!(outcome["reason"], "device not found");
    }
}
