//! Automation service — use-cases for directive lists and their dispatch.

use hubdesk_domain::automation::{Automation, DispatchReport, Setting};
use hubdesk_domain::error::{HubdeskError, NotFoundError};
use hubdesk_domain::id::{AutomationId, DeviceId};

use crate::ports::{AutomationRepository, DeviceRepository, HubGateway, HubRepository};

/// Application service for automation CRUD and command dispatch.
pub struct AutomationService<A, D, H, G> {
    automations: A,
    devices: D,
    hubs: H,
    gateway: G,
}

impl<A, D, H, G> AutomationService<A, D, H, G>
where
    A: AutomationRepository,
    D: DeviceRepository,
    H: HubRepository,
    G: HubGateway,
{
    /// Create a new service backed by the given repositories and gateway.
    pub fn new(automations: A, devices: D, hubs: H, gateway: G) -> Self {
        Self {
            automations,
            devices,
            hubs,
            gateway,
        }
    }

    /// Create an automation with no directives.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `name` or `hub` is empty,
    /// [`HubdeskError::NotFound`] if the hub does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, name: &str, hub: &str) -> Result<Automation, HubdeskError> {
        let automation = Automation::builder().name(name).hub(hub).build()?;
        if self.hubs.find_by_name(&automation.hub).await?.is_none() {
            return Err(NotFoundError {
                entity: "Hub",
                id: automation.hub,
            }
            .into());
        }
        self.automations.create(automation).await
    }

    /// List every automation.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_all(&self) -> Result<Vec<Automation>, HubdeskError> {
        self.automations.get_all().await
    }

    /// Look up an automation by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when no automation with `id` exists.
    pub async fn get(&self, id: AutomationId) -> Result<Automation, HubdeskError> {
        self.automations.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Append a `(device, setting)` directive.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the automation or device does
    /// not exist, [`HubdeskError::Validation`] for a blank setting, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(
        &self,
        id: AutomationId,
        device: DeviceId,
        setting: Setting,
    ) -> Result<Automation, HubdeskError> {
        let mut automation = self.get(id).await?;
        if self.devices.get_by_id(device).await?.is_none() {
            return Err(NotFoundError {
                entity: "Device",
                id: device.to_string(),
            }
            .into());
        }
        automation.add_directive(device, setting)?;
        self.automations.update(automation).await
    }

    /// Drop every directive aimed at `device`; absent devices are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the automation does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_device(
        &self,
        id: AutomationId,
        device: DeviceId,
    ) -> Result<Automation, HubdeskError> {
        let mut automation = self.get(id).await?;
        if automation.remove_device(device) == 0 {
            return Ok(automation);
        }
        self.automations.update(automation).await
    }

    /// Send every directive, in list order, through the hub of its device.
    ///
    /// Every directive is attempted. A missing device or hub, or a gateway
    /// failure, is recorded as a failed outcome and does not stop the rest.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the automation does not exist,
    /// or a storage error raised while looking up devices and hubs.
    #[tracing::instrument(skip(self))]
    pub async fn send_commands(&self, id: AutomationId) -> Result<DispatchReport, HubdeskError> {
        let automation = self.get(id).await?;
        let mut report = DispatchReport::new(automation.id);

        for directive in automation.directives {
            let Some(device) = self.devices.get_by_id(directive.device).await? else {
                report.failed(directive.device, directive.setting, "device not found");
                continue;
            };
            let Some(hub) = self.hubs.find_by_name(&device.hub).await? else {
                report.failed(
                    directive.device,
                    directive.setting,
                    format!("hub {} not found", device.hub),
                );
                continue;
            };
            match self
                .gateway
                .send_command(&hub, &device, &directive.setting)
                .await
            {
                Ok(()) => report.delivered(directive.device, directive.setting),
                Err(err) => {
                    tracing::warn!(device_id = %directive.device, hub = %hub.name, error = %err, "command not delivered");
                    report.failed(directive.device, directive.setting, failure_reason(&err));
                }
            }
        }

        tracing::info!(
            automation_id = %id,
            delivered = report.delivered,
            failed = report.failed,
            "automation dispatched"
        );
        Ok(report)
    }

    /// Delete an automation.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the automation does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: AutomationId) -> Result<(), HubdeskError> {
        self.get(id).await?;
        self.automations.delete(id).await
    }
}

/// Innermost useful message of a gateway error.
fn failure_reason(err: &HubdeskError) -> String {
    std::error::Error::source(err).map_or_else(|| err.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{
        InMemoryAutomationRepo, InMemoryDeviceRepo, InMemoryHubRepo, RecordingGateway,
    };
    use hubdesk_domain::automation::DispatchStatus;
    use hubdesk_domain::device::Device;
    use hubdesk_domain::error::ValidationError;
    use hubdesk_domain::hub::Hub;

    type Service =
        AutomationService<InMemoryAutomationRepo, InMemoryDeviceRepo, InMemoryHubRepo, RecordingGateway>;

    struct Fixture {
        svc: Service,
        devices: InMemoryDeviceRepo,
        hubs: InMemoryHubRepo,
        gateway: RecordingGateway,
    }

    impl Fixture {
        async fn new() -> Self {
            let devices = InMemoryDeviceRepo::default();
            let hubs = InMemoryHubRepo::default();
            let gateway = RecordingGateway::default();
            for name in ["H1", "H2"] {
                let hub = Hub::builder().name(name).address("10.0.0.1").build().unwrap();
                hubs.create(hub).await.unwrap();
            }
            let svc = AutomationService::new(
                InMemoryAutomationRepo::default(),
                devices.clone(),
                hubs.clone(),
                gateway.clone(),
            );
            Self {
                svc,
                devices,
                hubs,
                gateway,
            }
        }

        async fn device(&self, hub: &str, address: &str) -> DeviceId {
            let device = Device::builder().hub(hub).address(address).build().unwrap();
            self.devices.create(device).await.unwrap().id
        }
    }

    #[tokio::test]
    async fn should_create_empty_automation() {
        let fx = Fixture::new().await;

        let automation = fx.svc.add("evening", "H1").await.unwrap();

        assert_eq!(automation.name, "evening");
        assert_eq!(automation.hub, "H1");
        assert!(automation.directives.is_empty());
        assert_eq!(fx.svc.get(automation.id).await.unwrap(), automation);
    }

    #[tokio::test]
    async fn should_reject_automation_for_unknown_hub() {
        let fx = Fixture::new().await;

        let err = fx.svc.add("evening", "nowhere").await.unwrap_err();

        assert!(matches!(err, HubdeskError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_reject_blank_setting() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();
        let device = fx.device("H1", "10.0.0.5").await;

        let err = fx
            .svc
            .add_device(automation.id, device, Setting::from(" "))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HubdeskError::Validation(ValidationError::EmptySetting)
        ));
    }

    #[tokio::test]
    async fn should_dispatch_directives_in_list_order() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();
        let lamp = fx.device("H1", "10.0.0.5").await;
        let plug = fx.device("H2", "10.0.0.6").await;
        fx.svc
            .add_device(automation.id, lamp, Setting::On)
            .await
            .unwrap();
        fx.svc
            .add_device(automation.id, plug, Setting::Off)
            .await
            .unwrap();
        fx.svc
            .add_device(automation.id, lamp, Setting::from("dim:40"))
            .await
            .unwrap();

        let report = fx.svc.send_commands(automation.id).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.delivered, 3);
        let sent = fx.gateway.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![
                ("H1".to_string(), lamp, Setting::On),
                ("H2".to_string(), plug, Setting::Off),
                ("H1".to_string(), lamp, Setting::from("dim:40")),
            ]
        );
    }

    #[tokio::test]
    async fn should_continue_dispatch_after_failures() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();
        let gone = fx.device("H1", "10.0.0.4").await;
        let offline = fx.device("H2", "10.0.0.5").await;
        let fine = fx.device("H1", "10.0.0.6").await;
        for device in [gone, offline, fine] {
            fx.svc
                .add_device(automation.id, device, Setting::On)
                .await
                .unwrap();
        }
        fx.devices.delete(gone).await.unwrap();
        fx.gateway.take_offline("H2");

        let report = fx.svc.send_commands(automation.id).await.unwrap();

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.outcomes[0].device, gone);
        assert!(matches!(
            report.outcomes[0].status,
            DispatchStatus::Failed { .. }
        ));
        assert_eq!(report.outcomes[1].device, offline);
        assert_eq!(
            report.outcomes[1].status,
            DispatchStatus::Failed {
                reason: "hub H2 unreachable".to_string()
            }
        );
        assert_eq!(report.outcomes[2].status, DispatchStatus::Delivered);
    }

    #[tokio::test]
    async fn should_fail_directive_when_device_hub_was_deleted() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();
        let device = fx.device("H2", "10.0.0.5").await;
        fx.svc
            .add_device(automation.id, device, Setting::Toggle)
            .await
            .unwrap();
        let h2 = fx.hubs.find_by_name("H2").await.unwrap().unwrap();
        fx.hubs.delete(h2.id).await.unwrap();

        let report = fx.svc.send_commands(automation.id).await.unwrap();

        assert_eq!(
            report.outcomes[0].status,
            DispatchStatus::Failed {
                reason: "hub H2 not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_remove_every_matching_directive() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();
        let lamp = fx.device("H1", "10.0.0.5").await;
        let plug = fx.device("H1", "10.0.0.6").await;
        fx.svc
            .add_device(automation.id, lamp, Setting::On)
            .await
            .unwrap();
        fx.svc
            .add_device(automation.id, plug, Setting::On)
            .await
            .unwrap();
        fx.svc
            .add_device(automation.id, lamp, Setting::Off)
            .await
            .unwrap();

        let automation = fx.svc.remove_device(automation.id, lamp).await.unwrap();

        assert_eq!(automation.directives.len(), 1);
        assert_eq!(automation.directives[0].device, plug);
    }

    #[tokio::test]
    async fn should_delete_automation_then_report_not_found() {
        let fx = Fixture::new().await;
        let automation = fx.svc.add("evening", "H1").await.unwrap();

        fx.svc.delete(automation.id).await.unwrap();

        let err = fx.svc.send_commands(automation.id).await.unwrap_err();
        assert!(matches!(err, HubdeskError::NotFound(_)));
    }
}
