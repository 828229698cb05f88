//! Shared application state for axum handlers.

use std::sync::Arc;

use hubdesk_app::ports::{
    AccountNotifier, AutomationRepository, DeviceRepository, GroupRepository, HubGateway,
    HubRepository, UserRepository,
};
use hubdesk_app::services::account_service::AccountService;
use hubdesk_app::services::automation_service::AutomationService;
use hubdesk_app::services::device_service::DeviceService;
use hubdesk_app::services::group_service::GroupService;
use hubdesk_app::services::hub_service::HubService;

/// The set of concrete port implementations a server runs with.
///
/// Handlers are generic over one `P: Ports`. Implementors are usually
/// zero-sized markers.
pub trait Ports: Send + Sync + 'static {
    type Hubs: HubRepository + Send + Sync + 'static;
    type Devices: DeviceRepository + Send + Sync + 'static;
    type Groups: GroupRepository + Send + Sync + 'static;
    type Automations: AutomationRepository + Send + Sync + 'static;
    type Users: UserRepository + Send + Sync + 'static;
    type Gateway: HubGateway + Send + Sync + 'static;
    type Notifier: AccountNotifier + Send + Sync + 'static;
}

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the port types themselves do not need
/// to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<P: Ports> {
    /// Hub registration, ownership and firmware checks.
    pub hub_service: Arc<HubService<P::Hubs, P::Gateway>>,
    /// Device lifecycle.
    pub device_service: Arc<DeviceService<P::Devices, P::Hubs>>,
    /// Device groups.
    pub group_service: Arc<GroupService<P::Groups, P::Devices>>,
    /// Automations and their dispatch.
    pub automation_service:
        Arc<AutomationService<P::Automations, P::Devices, P::Hubs, P::Gateway>>,
    /// Accounts and bearer sessions.
    pub account_service: Arc<AccountService<P::Users, P::Notifier>>,
}

impl<P: Ports> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            hub_service: Arc::clone(&self.hub_service),
            device_service: Arc::clone(&self.device_service),
            group_service: Arc::clone(&self.group_service),
            automation_service: Arc::clone(&self.automation_service),
            account_service: Arc::clone(&self.account_service),
        }
    }
}

impl<P: Ports> AppState<P> {
    /// Create a new application state from service instances.
    pub fn new(
        hub_service: HubService<P::Hubs, P::Gateway>,
        device_service: DeviceService<P::Devices, P::Hubs>,
        group_service: GroupService<P::Groups, P::Devices>,
        automation_service: AutomationService<P::Automations, P::Devices, P::Hubs, P::Gateway>,
        account_service: AccountService<P::Users, P::Notifier>,
    ) -> Self {
        Self {
            hub_service: Arc::new(hub_service),
            device_service: Arc::new(device_service),
            group_service: Arc::new(group_service),
            automation_service: Arc::new(automation_service),
            account_service: Arc::new(account_service),
        }
    }
}
