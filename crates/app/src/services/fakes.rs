//! In-memory port implementations shared by the service tests.
//!
//! Each fake keeps its state behind an `Arc`, so a clone handed to one
//! service sees writes made through another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hubdesk_domain::automation::{Automation, Setting};
use hubdesk_domain::device::Device;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::group::Group;
use hubdesk_domain::hub::Hub;
use hubdesk_domain::id::{AutomationId, DeviceId, GroupId, HubId, UserId};
use hubdesk_domain::user::{PasswordReset, Session, User};

use crate::ports::{
    AccountNotifier, AutomationRepository, DeviceRepository, GroupRepository, HubGateway,
    HubRepository, UserRepository,
};

#[derive(Clone, Default)]
pub struct InMemoryHubRepo {
    store: Arc<Mutex<Vec<Hub>>>,
}

impl HubRepository for InMemoryHubRepo {
    async fn create(&self, hub: Hub) -> Result<Hub, HubdeskError> {
        self.store.lock().unwrap().push(hub.clone());
        Ok(hub)
    }

    async fn get_by_id(&self, id: HubId) -> Result<Option<Hub>, HubdeskError> {
        Ok(self.store.lock().unwrap().iter().find(|h| h.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Hub>, HubdeskError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.name == name)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Hub>, HubdeskError> {
        Ok(self.store.lock().unwrap().clone())
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Hub>, HubdeskError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.owner == Some(owner))
            .cloned()
            .collect())
    }

    async fn update(&self, hub: Hub) -> Result<Hub, HubdeskError> {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|h| h.id == hub.id) {
            *slot = hub.clone();
        }
        Ok(hub)
    }

    async fn delete(&self, id: HubId) -> Result<(), HubdeskError> {
        self.store.lock().unwrap().retain(|h| h.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDeviceRepo {
    store: Arc<Mutex<Vec<Device>>>,
}

impl DeviceRepository for InMemoryDeviceRepo {
    async fn create(&self, device: Device) -> Result<Device, HubdeskError> {
        self.store.lock().unwrap().push(device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, HubdeskError> {
        Ok(self.store.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_hub(&self, hub: &str) -> Result<Vec<Device>, HubdeskError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.hub == hub)
            .cloned()
            .collect())
    }

    async fn update(&self, device: Device) -> Result<Device, HubdeskError> {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|d| d.id == device.id) {
            *slot = device.clone();
        }
        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), HubdeskError> {
        self.store.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGroupRepo {
    store: Arc<Mutex<HashMap<GroupId, Group>>>,
}

impl GroupRepository for InMemoryGroupRepo {
    async fn create(&self, group: Group) -> Result<Group, HubdeskError> {
        self.store.lock().unwrap().insert(group.id, group.clone());
        Ok(group)
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, HubdeskError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Group>, HubdeskError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, group: Group) -> Result<Group, HubdeskError> {
        self.store.lock().unwrap().insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: GroupId) -> Result<(), HubdeskError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAutomationRepo {
    store: Arc<Mutex<HashMap<AutomationId, Automation>>>,
}

impl AutomationRepository for InMemoryAutomationRepo {
    async fn create(&self, automation: Automation) -> Result<Automation, HubdeskError> {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, HubdeskError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Automation>, HubdeskError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, automation: Automation) -> Result<Automation, HubdeskError> {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        Ok(automation)
    }

    async fn delete(&self, id: AutomationId) -> Result<(), HubdeskError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepo {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl InMemoryUserRepo {
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepo {
    async fn create(&self, user: User) -> Result<User, HubdeskError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, HubdeskError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, HubdeskError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, HubdeskError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.reset.as_ref().is_some_and(|r| r.token == token))
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, HubdeskError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), HubdeskError> {
        self.users.lock().unwrap().remove(&id);
        self.sessions.lock().unwrap().retain(|_, s| s.user != id);
        Ok(())
    }

    async fn create_session(&self, session: Session) -> Result<Session, HubdeskError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, HubdeskError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<(), HubdeskError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn delete_sessions_for(&self, user: UserId) -> Result<(), HubdeskError> {
        self.sessions.lock().unwrap().retain(|_, s| s.user != user);
        Ok(())
    }
}

/// Gateway that records every command and fails for hubs marked offline.
#[derive(Clone)]
pub struct RecordingGateway {
    pub sent: Arc<Mutex<Vec<(String, DeviceId, Setting)>>>,
    pub offline: Arc<Mutex<Vec<String>>>,
    pub latest: String,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            sent: Arc::default(),
            offline: Arc::default(),
            latest: "1.0.0".to_string(),
        }
    }
}

impl RecordingGateway {
    pub fn take_offline(&self, hub: &str) {
        self.offline.lock().unwrap().push(hub.to_string());
    }
}

impl HubGateway for RecordingGateway {
    async fn send_command(
        &self,
        hub: &Hub,
        device: &Device,
        setting: &Setting,
    ) -> Result<(), HubdeskError> {
        if self.offline.lock().unwrap().contains(&hub.name) {
            return Err(HubdeskError::Gateway(
                format!("hub {} unreachable", hub.name).into(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((hub.name.clone(), device.id, setting.clone()));
        Ok(())
    }

    async fn latest_firmware(&self, _hub: &Hub) -> Result<String, HubdeskError> {
        Ok(self.latest.clone())
    }
}

/// Notifier that keeps every reset token it was handed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub resets: Arc<Mutex<Vec<(String, String)>>>,
}

impl AccountNotifier for RecordingNotifier {
    async fn password_reset_requested(
        &self,
        user: &User,
        reset: &PasswordReset,
    ) -> Result<(), HubdeskError> {
        self.resets
            .lock()
            .unwrap()
            .push((user.email.clone(), reset.token.clone()));
        Ok(())
    }
}
