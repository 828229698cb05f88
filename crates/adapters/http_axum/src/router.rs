//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, Ports};

/// Build the top-level axum [`Router`].
///
/// Mounts the resource routes at `/` next to a `/health` check.
/// Every route allows cross-origin requests from any origin and gzips
/// responses for clients that accept it. A [`TraceLayer`] logs each HTTP
/// request/response at the `DEBUG` level.
pub fn build<P: Ports>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use hubdesk_app::services::account_service::AccountService;
    use hubdesk_app::services::automation_service::AutomationService;
    use hubdesk_app::services::device_service::DeviceService;
    use hubdesk_app::services::group_service::GroupService;
    use hubdesk_app::services::hub_service::HubService;
    use hubdesk_domain::automation::{Automation, Setting};
    use hubdesk_domain::device::Device;
    use hubdesk_domain::error::HubdeskError;
    use hubdesk_domain::group::Group;
    use hubdesk_domain::hub::Hub;
    use hubdesk_domain::id::{AutomationId, DeviceId, GroupId, HubId, UserId};
    use hubdesk_domain::user::{PasswordReset, Session, User};
    use tower::ServiceExt;

    struct StubHubRepo;
    struct StubDeviceRepo;
    struct StubGroupRepo;
    struct StubAutomationRepo;
    struct StubUserRepo;
    struct StubGateway;
    struct StubNotifier;

    impl hubdesk_app::ports::HubRepository for StubHubRepo {
        async fn create(&self, hub: Hub) -> Result<Hub, HubdeskError> {
            Ok(hub)
        }
        async fn get_by_id(&self, _id: HubId) -> Result<Option<Hub>, HubdeskError> {
            Ok(None)
        }
        async fn find_by_name(&self, _name: &str) -> Result<Option<Hub>, HubdeskError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Hub>, HubdeskError> {
            Ok(vec![])
        }
        async fn find_by_owner(&self, _owner: UserId) -> Result<Vec<Hub>, HubdeskError> {
            Ok(vec![])
        }
        async fn update(&self, hub: Hub) -> Result<Hub, HubdeskError> {
            Ok(hub)
        }
        async fn delete(&self, _id: HubId) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    impl hubdesk_app::ports::DeviceRepository for StubDeviceRepo {
        async fn create(&self, device: Device) -> Result<Device, HubdeskError> {
            Ok(device)
        }
        async fn get_by_id(&self, _id: DeviceId) -> Result<Option<Device>, HubdeskError> {
            Ok(None)
        }
        async fn find_by_hub(&self, _hub: &str) -> Result<Vec<Device>, HubdeskError> {
            Ok(vec![])
        }
        async fn update(&self, device: Device) -> Result<Device, HubdeskError> {
            Ok(device)
        }
        async fn delete(&self, _id: DeviceId) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    impl hubdesk_app::ports::GroupRepository for StubGroupRepo {
        async fn create(&self, group: Group) -> Result<Group, HubdeskError> {
            Ok(group)
        }
        async fn get_by_id(&self, _id: GroupId) -> Result<Option<Group>, HubdeskError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Group>, HubdeskError> {
            Ok(vec![])
        }
        async fn update(&self, group: Group) -> Result<Group, HubdeskError> {
            Ok(group)
        }
        async fn delete(&self, _id: GroupId) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    impl hubdesk_app::ports::AutomationRepository for StubAutomationRepo {
        async fn create(&self, automation: Automation) -> Result<Automation, HubdeskError> {
            Ok(automation)
        }
        async fn get_by_id(&self, _id: AutomationId) -> Result<Option<Automation>, HubdeskError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Automation>, HubdeskError> {
            Ok(vec![])
        }
        async fn update(&self, automation: Automation) -> Result<Automation, HubdeskError> {
            Ok(automation)
        }
        async fn delete(&self, _id: AutomationId) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    impl hubdesk_app::ports::UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, HubdeskError> {
            Ok(user)
        }
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, HubdeskError> {
            Ok(None)
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, HubdeskError> {
            Ok(None)
        }
        async fn find_by_reset_token(&self, _token: &str) -> Result<Option<User>, HubdeskError> {
            Ok(None)
        }
        async fn update(&self, user: User) -> Result<User, HubdeskError> {
            Ok(user)
        }
        async fn delete(&self, _id: UserId) -> Result<(), HubdeskError> {
            Ok(())
        }
        async fn create_session(&self, session: Session) -> Result<Session, HubdeskError> {
            Ok(session)
        }
        async fn find_session(&self, _token: &str) -> Result<Option<Session>, HubdeskError> {
            Ok(None)
        }
        async fn delete_session(&self, _token: &str) -> Result<(), HubdeskError> {
            Ok(())
        }
        async fn delete_sessions_for(&self, _user: UserId) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    impl hubdesk_app::ports::HubGateway for StubGateway {
        async fn send_command(
            &self,
            _hub: &Hub,
            _device: &Device,
            _setting: &Setting,
        ) -> Result<(), HubdeskError> {
            Ok(())
        }
        async fn latest_firmware(&self, _hub: &Hub) -> Result<String, HubdeskError> {
            Ok("1.0.0".to_string())
        }
    }

    impl hubdesk_app::ports::AccountNotifier for StubNotifier {
        async fn password_reset_requested(
            &self,
            _user: &User,
            _reset: &PasswordReset,
        ) -> Result<(), HubdeskError> {
            Ok(())
        }
    }

    struct StubPorts;

    impl Ports for StubPorts {
        type Hubs = StubHubRepo;
        type Devices = StubDeviceRepo;
        type Groups = StubGroupRepo;
        type Automations = StubAutomationRepo;
        type Users = StubUserRepo;
        type Gateway = StubGateway;
        type Notifier = StubNotifier;
    }

    fn test_state() -> AppState<StubPorts> {
        AppState::new(
            HubService::new(StubHubRepo, StubGateway),
            DeviceService::new(StubDeviceRepo, StubHubRepo),
            GroupService::new(StubGroupRepo, StubDeviceRepo),
            AutomationService::new(StubAutomationRepo, StubDeviceRepo, StubHubRepo, StubGateway),
            AccountService::new(StubUserRepo, StubNotifier),
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_allow_cross_origin_requests() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://dashboard.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn should_answer_cors_preflight_for_api_routes() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/devices/add")
                    .header(header::ORIGIN, "https://dashboard.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn should_return_not_found_body_when_device_id_is_unknown() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/devices/unknown-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "not found");
    }

    #[tokio::test]
    async fn should_answer_list_routes_with_and_without_trailing_slash() {
        for uri in ["/hubs", "/hubs/"] {
            let response = build(test_state())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_json(response).await, serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn should_return_bad_request_when_body_is_missing_fields() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/groups/add")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title":"Kitchen"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("malformed request body"));
    }

    #[tokio::test]
    async fn should_return_unauthorized_when_account_requested_without_token() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/account/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_return_unauthorized_when_token_is_unknown() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/hubs")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_create_group_with_created_status() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/groups/add")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Kitchen"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Kitchen");
        assert!(body["groupID"].is_string());
    }
}
