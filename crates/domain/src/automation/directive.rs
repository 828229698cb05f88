//! Directive — a single (device, setting) pair within an automation.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::macros::define_open_enum;

define_open_enum!(
    /// Value sent to a device when its automation is dispatched.
    ///
    /// Anything outside the switch vocabulary (a brightness, a set point,
    /// a scene name) travels as [`Setting::Other`].
    Setting {
        On => "on",
        Off => "off",
        Toggle => "toggle",
    }
);

/// Instructs one device to take one setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(rename = "deviceID")]
    pub device: DeviceId,
    pub setting: Setting,
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <- {}", self.device, self.setting)
    }
}
