//! Virtual hub gateway — simulated hubs that apply settings in memory.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hubdesk_app::ports::HubGateway;
use hubdesk_domain::automation::Setting;
use hubdesk_domain::device::Device;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::hub::Hub;
use hubdesk_domain::id::DeviceId;

/// Failures a simulated hub can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("hub {hub} is offline")]
    HubOffline { hub: String },
}

impl From<GatewayError> for HubdeskError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(Box::new(err))
    }
}

/// A command a simulated hub accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredCommand {
    pub hub: String,
    pub device: DeviceId,
    pub setting: Setting,
}

/// Most devices whose current setting a gateway remembers.
pub const APPLIED_CAPACITY: usize = 4096;

struct State {
    latest_firmware: String,
    offline: HashSet<String>,
    /// `None` unless built with [`VirtualHubGateway::recording`].
    delivered: Option<Vec<DeliveredCommand>>,
    applied: HashMap<DeviceId, Setting>,
    applied_capacity: usize,
}

impl State {
    fn remember(&mut self, device: DeviceId, setting: Setting) {
        if !self.applied.contains_key(&device) && self.applied.len() >= self.applied_capacity {
            let evicted = self.applied.keys().next().copied();
            if let Some(evicted) = evicted {
                self.applied.remove(&evicted);
            }
        }
        self.applied.insert(device, setting);
    }
}

/// Gateway to simulated hubs.
///
/// Clones share state, so a test can keep one handle while the services own
/// another.
#[derive(Clone)]
pub struct VirtualHubGateway {
    state: Arc<Mutex<State>>,
}

impl VirtualHubGateway {
    /// Create a gateway whose firmware catalog advertises `latest_firmware`.
    ///
    /// Accepted commands are not kept; see [`VirtualHubGateway::recording`].
    #[must_use]
    pub fn new(latest_firmware: impl Into<String>) -> Self {
        Self::build(latest_firmware.into(), None, APPLIED_CAPACITY)
    }

    /// Like [`VirtualHubGateway::new`], but every accepted command is kept
    /// for [`VirtualHubGateway::delivered`].
    #[must_use]
    pub fn recording(latest_firmware: impl Into<String>) -> Self {
        Self::build(latest_firmware.into(), Some(Vec::new()), APPLIED_CAPACITY)
    }

    fn build(
        latest_firmware: String,
        delivered: Option<Vec<DeliveredCommand>>,
        applied_capacity: usize,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                latest_firmware,
                offline: HashSet::new(),
                delivered,
                applied: HashMap::new(),
                applied_capacity,
            })),
        }
    }

    /// Publish a new firmware release.
    pub fn set_latest_firmware(&self, version: impl Into<String>) {
        self.lock().latest_firmware = version.into();
    }

    /// Mark the hub named `hub` unreachable (or reachable again).
    pub fn set_offline(&self, hub: &str, offline: bool) {
        let mut state = self.lock();
        if offline {
            state.offline.insert(hub.to_string());
        } else {
            state.offline.remove(hub);
        }
    }

    /// Every accepted command, oldest first. Always empty unless the
    /// gateway is [recording](VirtualHubGateway::recording).
    #[must_use]
    pub fn delivered(&self) -> Vec<DeliveredCommand> {
        self.lock().delivered.clone().unwrap_or_default()
    }

    /// Setting the device currently holds, if it ever received one.
    ///
    /// `toggle` is resolved against the previous setting, so the result is
    /// never [`Setting::Toggle`].
    #[must_use]
    pub fn applied_setting(&self, device: DeviceId) -> Option<Setting> {
        self.lock().applied.get(&device).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for VirtualHubGateway {
    fn default() -> Self {
        Self::new("1.0.0")
    }
}

fn resolve(previous: Option<&Setting>, requested: &Setting) -> Setting {
    match requested {
        Setting::Toggle => match previous {
            Some(Setting::On) => Setting::Off,
            _ => Setting::On,
        },
        other => other.clone(),
    }
}

impl HubGateway for VirtualHubGateway {
    async fn send_command(
        &self,
        hub: &Hub,
        device: &Device,
        setting: &Setting,
    ) -> Result<(), HubdeskError> {
        let mut state = self.lock();
        if state.offline.contains(&hub.name) {
            return Err(GatewayError::HubOffline {
                hub: hub.name.clone(),
            }
            .into());
        }
        let applied = resolve(state.applied.get(&device.id), setting);
        tracing::debug!(hub = %hub.name, device_id = %device.id, %setting, %applied, "command applied");
        state.remember(device.id, applied);
        if let Some(delivered) = state.delivered.as_mut() {
            delivered.push(DeliveredCommand {
                hub: hub.name.clone(),
                device: device.id,
                setting: setting.clone(),
            });
        }
        Ok(())
    }

    async fn latest_firmware(&self, hub: &Hub) -> Result<String, HubdeskError> {
        let state = self.lock();
        if state.offline.contains(&hub.name) {
            return Err(GatewayError::HubOffline {
                hub: hub.name.clone(),
            }
            .into());
        }
        Ok(state.latest_firmware.clone())
    }
}
