//! Bearer-session extractors.
//!
//! Tokens come from `POST /users/signup` and `POST /users/login` and are
//! resolved through [`AccountService::authenticate`](hubdesk_app::services::account_service::AccountService::authenticate).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hubdesk_domain::error::{AuthError, HubdeskError};
use hubdesk_domain::user::User;

use crate::error::ApiError;
use crate::extract::bearer_token;
use crate::state::{AppState, Ports};

/// A request carrying a valid session. Rejects with 401 otherwise.
pub struct Authenticated {
    pub user: User,
    pub token: String,
}

impl<P: Ports> FromRequestParts<AppState<P>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| HubdeskError::from(AuthError::MissingCredentials))?
            .to_string();
        let user = state.account_service.authenticate(&token).await?;
        Ok(Self { user, token })
    }
}

/// A request that may carry a session.
///
/// No `Authorization` header yields `None`; a header with an unknown token
/// is still rejected with 401.
pub struct MaybeAuthenticated(pub Option<Authenticated>);

impl<P: Ports> FromRequestParts<AppState<P>> for MaybeAuthenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P>,
    ) -> Result<Self, Self::Rejection> {
        if bearer_token(parts).is_none() {
            return Ok(Self(None));
        }
        Authenticated::from_request_parts(parts, state)
            .await
            .map(|auth| Self(Some(auth)))
    }
}
