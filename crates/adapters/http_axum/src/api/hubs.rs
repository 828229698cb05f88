//! JSON REST handlers for hubs.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hubdesk_domain::hub::{Hub, UpdateCheck};
use hubdesk_domain::id::HubId;

use crate::auth::{Authenticated, MaybeAuthenticated};
use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, Ports};

/// Request body for `POST /hubs/register` and `POST /hubs/add`.
#[derive(Deserialize)]
pub struct CreateHubRequest {
    pub name: String,
    pub address: String,
}

/// Request body for endpoints addressing a single hub.
#[derive(Deserialize)]
pub struct HubRef {
    #[serde(rename = "hubID")]
    pub hub_id: String,
}

/// Possible responses from the create endpoints.
pub enum CreateResponse {
    Created(Json<Hub>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Hub>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /hubs/register`: a hub announcing itself, without an owner.
pub async fn register<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<CreateHubRequest>,
) -> Result<CreateResponse, ApiError> {
    let hub = state.hub_service.register(&req.name, &req.address).await?;
    Ok(CreateResponse::Created(Json(hub)))
}

/// `POST /hubs/add`: a hub added by the signed-in user, who becomes its owner.
pub async fn add<P: Ports>(
    State(state): State<AppState<P>>,
    auth: Authenticated,
    ApiJson(req): ApiJson<CreateHubRequest>,
) -> Result<CreateResponse, ApiError> {
    let hub = state
        .hub_service
        .add(&req.name, &req.address, auth.user.id)
        .await?;
    Ok(CreateResponse::Created(Json(hub)))
}

/// `POST /hubs/delete`
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    MaybeAuthenticated(auth): MaybeAuthenticated,
    ApiJson(req): ApiJson<HubRef>,
) -> Result<DeleteResponse, ApiError> {
    let id: HubId = parse_id(&req.hub_id)?;
    state
        .hub_service
        .delete(id, auth.map(|a| a.user.id))
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /hubs`: the caller's hubs when signed in, every hub otherwise.
pub async fn list<P: Ports>(
    State(state): State<AppState<P>>,
    MaybeAuthenticated(auth): MaybeAuthenticated,
) -> Result<ListResponse, ApiError> {
    let hubs = match auth {
        Some(auth) => state.hub_service.list_owned(auth.user.id).await?,
        None => state.hub_service.list_all().await?,
    };
    Ok(ListResponse::Ok(Json(hubs)))
}

/// `POST /hubs/checkUpdates`
pub async fn check_updates<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<HubRef>,
) -> Result<Json<UpdateCheck>, ApiError> {
    let id: HubId = parse_id(&req.hub_id)?;
    let check = state.hub_service.check_updates(id).await?;
    Ok(Json(check))
}
