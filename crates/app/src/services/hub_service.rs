//! Hub service — use-cases for registering, listing and retiring hubs.

use hubdesk_domain::error::{AuthError, HubdeskError, NotFoundError, ValidationError};
use hubdesk_domain::hub::{Hub, UpdateCheck};
use hubdesk_domain::id::{HubId, UserId};

use crate::ports::{HubGateway, HubRepository};

/// Application service for hub CRUD and firmware checks.
pub struct HubService<R, G> {
    repo: R,
    gateway: G,
}

impl<R: HubRepository, G: HubGateway> HubService<R, G> {
    /// Create a new service backed by the given repository and gateway.
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Register a hub announcing itself; the result has no owner.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] if `name` or `address` is empty
    /// or the name is already taken, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, name: &str, address: &str) -> Result<Hub, HubdeskError> {
        let hub = Hub::builder().name(name).address(address).build()?;
        self.insert(hub).await
    }

    /// Add a hub on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Same as [`HubService::register`].
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, name: &str, address: &str, owner: UserId) -> Result<Hub, HubdeskError> {
        let hub = Hub::builder()
            .name(name)
            .address(address)
            .owner(owner)
            .build()?;
        self.insert(hub).await
    }

    async fn insert(&self, hub: Hub) -> Result<Hub, HubdeskError> {
        if self.repo.find_by_name(&hub.name).await?.is_some() {
            return Err(ValidationError::AlreadyTaken { field: "name" }.into());
        }
        let hub = self.repo.create(hub).await?;
        tracing::info!(hub_id = %hub.id, name = %hub.name, "hub created");
        Ok(hub)
    }

    /// Look up a hub by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when no hub with `id` exists.
    pub async fn get(&self, id: HubId) -> Result<Hub, HubdeskError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Hub",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a hub by the name devices refer to it by.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when no hub carries `name`.
    pub async fn get_by_name(&self, name: &str) -> Result<Hub, HubdeskError> {
        self.repo.find_by_name(name).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Hub",
                id: name.to_string(),
            }
            .into()
        })
    }

    /// List every hub.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_all(&self) -> Result<Vec<Hub>, HubdeskError> {
        self.repo.get_all().await
    }

    /// List the hubs owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_owned(&self, owner: UserId) -> Result<Vec<Hub>, HubdeskError> {
        self.repo.find_by_owner(owner).await
    }

    /// Delete a hub. Owned hubs may only be deleted by their owner.
    ///
    /// Devices attached to the hub are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the hub does not exist,
    /// [`AuthError::Forbidden`] when `user` does not own it, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: HubId, user: Option<UserId>) -> Result<(), HubdeskError> {
        let hub = self.get(id).await?;
        if !hub.is_manageable_by(user) {
            return Err(AuthError::Forbidden.into());
        }
        self.repo.delete(id).await?;
        tracing::info!(hub_id = %id, "hub deleted");
        Ok(())
    }

    /// Compare the hub's firmware against the newest published release.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] if the hub does not exist, or an
    /// error from the gateway.
    #[tracing::instrument(skip(self))]
    pub async fn check_updates(&self, id: HubId) -> Result<UpdateCheck, HubdeskError> {
        let hub = self.get(id).await?;
        let latest = self.gateway.latest_firmware(&hub).await?;
        Ok(UpdateCheck::evaluate(&hub, latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{InMemoryHubRepo, RecordingGateway};

    fn service() -> HubService<InMemoryHubRepo, RecordingGateway> {
        HubService::new(InMemoryHubRepo::default(), RecordingGateway::default())
    }

    #[tokio::test]
    async fn should_register_unowned_hub() {
        let svc = service();

        let hub = svc.register("H1", "10.0.0.1").await.unwrap();

        assert_eq!(hub.name, "H1");
        assert_eq!(hub.address, "10.0.0.1");
        assert!(hub.owner.is_none());
        assert_eq!(svc.get(hub.id).await.unwrap(), hub);
    }

    #[tokio::test]
    async fn should_reject_hub_with_empty_name() {
        let svc = service();

        let err = svc.register("", "10.0.0.1").await.unwrap_err();

        assert!(matches!(
            err,
            HubdeskError::Validation(ValidationError::EmptyName)
        ));
    }

    #[tokio::test]
    async fn should_reject_duplicate_hub_name() {
        let svc = service();
        svc.register("H1", "10.0.0.1").await.unwrap();

        let err = svc.add("H1", "10.0.0.2", UserId::new()).await.unwrap_err();

        assert!(matches!(
            err,
            HubdeskError::Validation(ValidationError::AlreadyTaken { field: "name" })
        ));
    }

    #[tokio::test]
    async fn should_list_only_owned_hubs() {
        let svc = service();
        let alice = UserId::new();
        svc.add("A", "10.0.0.1", alice).await.unwrap();
        svc.add("B", "10.0.0.2", UserId::new()).await.unwrap();
        svc.register("C", "10.0.0.3").await.unwrap();

        let owned = svc.list_owned(alice).await.unwrap();
        let all = svc.list_all().await.unwrap();

        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].name, "A");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn should_forbid_deleting_someone_elses_hub() {
        let svc = service();
        let hub = svc.add("H1", "10.0.0.1", UserId::new()).await.unwrap();

        let err = svc.delete(hub.id, Some(UserId::new())).await.unwrap_err();

        assert!(matches!(err, HubdeskError::Auth(AuthError::Forbidden)));
        assert!(svc.get(hub.id).await.is_ok());
    }

    #[tokio::test]
    async fn should_delete_owned_hub_then_report_not_found() {
        let svc = service();
        let owner = UserId::new();
        let hub = svc.add("H1", "10.0.0.1", owner).await.unwrap();

        svc.delete(hub.id, Some(owner)).await.unwrap();

        let err = svc.get(hub.id).await.unwrap_err();
        assert!(matches!(err, HubdeskError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_hub() {
        let svc = service();

        let err = svc.delete(HubId::new(), None).await.unwrap_err();

        assert!(matches!(err, HubdeskError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_report_available_update() {
        let svc = service();
        let hub = svc.register("H1", "10.0.0.1").await.unwrap();

        let check = svc.check_updates(hub.id).await.unwrap();

        assert_eq!(check.hub_id, hub.id);
        assert_eq!(check.latest_version, "1.0.0");
        assert!(check.update_available);
    }
}
