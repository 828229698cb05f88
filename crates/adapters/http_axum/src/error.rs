//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hubdesk_domain::error::{HubdeskError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Maps [`HubdeskError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HubdeskError);

impl From<HubdeskError> for ApiError {
    fn from(err: HubdeskError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match &self.0 {
            HubdeskError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            HubdeskError::NotFound(err) => (
                StatusCode::NOT_FOUND,
                "not found".to_string(),
                Some(err.to_string()),
            ),
            HubdeskError::Auth(err) if err.is_forbidden() => {
                (StatusCode::FORBIDDEN, err.to_string(), None)
            }
            HubdeskError::Auth(err) => (StatusCode::UNAUTHORIZED, err.to_string(), None),
            HubdeskError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
            HubdeskError::Gateway(err) => {
                tracing::warn!(error = %err, "gateway error");
                (
                    StatusCode::BAD_GATEWAY,
                    "hub unreachable".to_string(),
                    Some(err.to_string()),
                )
            }
            HubdeskError::Hashing(err) => {
                tracing::error!(error = %err, "password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error, detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubdesk_domain::error::{AuthError, NotFoundError};
    use http_body_util::BodyExt;

    async fn render(err: HubdeskError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn should_map_validation_to_bad_request() {
        let (status, body) = render(ValidationError::EmptyAddress.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "address must not be empty"}));
    }

    #[tokio::test]
    async fn should_map_not_found_with_detail() {
        let (status, body) = render(
            NotFoundError {
                entity: "Device",
                id: "abc".to_string(),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
        assert_eq!(body["detail"], "Device abc not found");
    }

    #[tokio::test]
    async fn should_map_auth_errors_to_401_or_403() {
        let (unauthorized, _) = render(AuthError::InvalidToken.into()).await;
        let (forbidden, _) = render(AuthError::Forbidden.into()).await;

        assert_eq!(unauthorized, StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_hide_storage_details() {
        let (status, body) = render(HubdeskError::Storage("disk on fire".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "internal server error"}));
    }

    #[tokio::test]
    async fn should_map_gateway_failure_to_bad_gateway() {
        let (status, body) = render(HubdeskError::Gateway("hub H1 is offline".into())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "hub unreachable");
        assert_eq!(body["detail"], "hub H1 is offline");
    }
}
