//! JSON REST handlers for accounts and sessions.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hubdesk_domain::error::{HubdeskError, ValidationError};
use hubdesk_domain::user::{Profile, Session, User};

use crate::auth::Authenticated;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, Ports};

/// Request body for `POST /users/signup`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Request body for `POST /users/login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/forgot`.
#[derive(Deserialize)]
pub struct ForgotRequest {
    pub email: String,
}

/// Request body for `POST /users/reset`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

/// Request body for `POST /users/account/password`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest {
    pub password: String,
    pub confirm_password: Option<String>,
}

/// Response body for a successful signup.
#[derive(Serialize)]
pub struct SignupBody {
    pub user: User,
    pub token: String,
}

/// Plain acknowledgement body.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Possible responses from the account endpoints.
pub enum AccountResponse {
    Created(Json<SignupBody>),
    Session(Json<Session>),
    Account(Json<User>),
    Accepted(Json<MessageBody>),
    Done(Json<MessageBody>),
    NoContent,
}

impl IntoResponse for AccountResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Session(json) => json.into_response(),
            Self::Account(json) => json.into_response(),
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
            Self::Done(json) => json.into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn check_confirmation(password: &str, confirm: Option<&str>) -> Result<(), HubdeskError> {
    match confirm {
        Some(confirm) if confirm != password => Err(ValidationError::InvalidField {
            field: "confirmPassword",
        }
        .into()),
        _ => Ok(()),
    }
}

/// `POST /users/signup`
pub async fn signup<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<AccountResponse, ApiError> {
    check_confirmation(&req.password, req.confirm_password.as_deref())?;
    let (user, session) = state
        .account_service
        .signup(&req.email, &req.password, req.profile)
        .await?;
    Ok(AccountResponse::Created(Json(SignupBody {
        user,
        token: session.token,
    })))
}

/// `POST /users/login`
pub async fn login<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<AccountResponse, ApiError> {
    let session = state
        .account_service
        .login(&req.email, &req.password)
        .await?;
    Ok(AccountResponse::Session(Json(session)))
}

/// `POST /users/logout`
pub async fn logout<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
) -> Result<AccountResponse, ApiError> {
    state.account_service.logout(&auth.token).await?;
    Ok(AccountResponse::NoContent)
}

/// `POST /users/forgot`
///
/// Answers the same way whether or not the address belongs to an account.
pub async fn forgot<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<ForgotRequest>,
) -> Result<AccountResponse, ApiError> {
    state.account_service.forgot_password(&req.email).await?;
    Ok(AccountResponse::Accepted(Json(MessageBody {
        message: "if the address is registered, reset instructions have been sent",
    })))
}

/// `POST /users/reset`
pub async fn reset<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<ResetRequest>,
) -> Result<AccountResponse, ApiError> {
    check_confirmation(&req.password, req.confirm_password.as_deref())?;
    state
        .account_service
        .reset_password(&req.token, &req.password)
        .await?;
    Ok(AccountResponse::Done(Json(MessageBody {
        message: "password has been reset",
    })))
}

/// `GET /users/account`
pub async fn account<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
) -> Result<AccountResponse, ApiError> {
    let user = state.account_service.account(auth.user.id).await?;
    Ok(AccountResponse::Account(Json(user)))
}

/// `POST /users/account/profile`
pub async fn update_profile<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
    ApiJson(profile): ApiJson<Profile>,
) -> Result<AccountResponse, ApiError> {
    let user = state
        .account_service
        .update_profile(auth.user.id, profile)
        .await?;
    Ok(AccountResponse::Account(Json(user)))
}

/// `POST /users/account/password`
pub async fn update_password<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
    ApiJson(req): ApiJson<PasswordRequest>,
) -> Result<AccountResponse, ApiError> {
    check_confirmation(&req.password, req.confirm_password.as_deref())?;
    state
        .account_service
        .update_password(auth.user.id, &req.password)
        .await?;
    Ok(AccountResponse::Done(Json(MessageBody {
        message: "password has been changed",
    })))
}

/// `POST /users/account/delete`
pub async fn delete_account<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
) -> Result<AccountResponse, ApiError> {
    state.account_service.delete_account(auth.user.id).await?;
    Ok(AccountResponse::NoContent)
}
