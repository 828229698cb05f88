//! Request extractors and identifier parsing shared by the handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use hubdesk_domain::error::{HubdeskError, NotFoundError};
use hubdesk_domain::id::MalformedId;

use crate::error::ApiError;

/// JSON body whose rejections are reported as validation errors (400)
/// using the API's error body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Parse a record identifier. Malformed ids are reported as not found.
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = MalformedId>,
{
    T::from_str(raw).map_err(|err| HubdeskError::from(NotFoundError::from(err)).into())
}

/// Token from an `Authorization: Bearer <token>` header, if present.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use hubdesk_domain::id::DeviceId;

    #[test]
    fn should_parse_valid_id() {
        let id = DeviceId::new();

        let parsed: DeviceId = parse_id(&id.to_string()).unwrap();

        assert_eq!(parsed, id);
    }

    #[test]
    fn should_treat_malformed_id_as_not_found() {
        let result: Result<DeviceId, ApiError> = parse_id("unknown-id");

        assert!(result.is_err());
    }

    #[test]
    fn should_read_bearer_token() {
        let (parts, ()) = HttpRequest::builder()
            .header(AUTHORIZATION, "Bearer abc123")
            .body(())
            .unwrap()
            .into_parts();

        assert_eq!(bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn should_ignore_other_schemes() {
        let (parts, ()) = HttpRequest::builder()
            .header(AUTHORIZATION, "Basic abc123")
            .body(())
            .unwrap()
            .into_parts();

        assert_eq!(bearer_token(&parts), None);
    }
}
