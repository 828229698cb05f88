//! JSON REST handlers for device groups.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hubdesk_domain::group::Group;
use hubdesk_domain::id::{DeviceId, GroupId};

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, Ports};

/// Request body for `POST /groups/add`.
#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Request body for `POST /groups/addDevice` and `POST /groups/removeDevice`.
#[derive(Deserialize)]
pub struct MembershipRequest {
    #[serde(rename = "groupID")]
    pub group_id: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

/// Request body for `POST /groups/delete`.
#[derive(Deserialize)]
pub struct GroupRef {
    #[serde(rename = "groupID")]
    pub group_id: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Group>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
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

/// `POST /groups/add`
pub async fn add<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<CreateGroupRequest>,
) -> Result<CreateResponse, ApiError> {
    let group = state.group_service.add(&req.name).await?;
    Ok(CreateResponse::Created(Json(group)))
}

/// `POST /groups`
pub async fn list<P: Ports>(State(state): State<AppState<P>>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(state.group_service.list_all().await?))
}

/// `GET /groups/{groupID}`
pub async fn get<P: Ports>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let id: GroupId = parse_id(&id)?;
    Ok(Json(state.group_service.get(id).await?))
}

/// `POST /groups/addDevice`
pub async fn add_device<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<MembershipRequest>,
) -> Result<Json<Group>, ApiError> {
    let group: GroupId = parse_id(&req.group_id)?;
    let device: DeviceId = parse_id(&req.device_id)?;
    Ok(Json(state.group_service.add_device(group, device).await?))
}

/// `POST /groups/removeDevice`
///
/// A device id that cannot exist is simply not a member.
pub async fn remove_device<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<MembershipRequest>,
) -> Result<Json<Group>, ApiError> {
    let group: GroupId = parse_id(&req.group_id)?;
    let Ok(device) = req.device_id.trim().parse::<DeviceId>() else {
        return Ok(Json(state.group_service.get(group).await?));
    };
    Ok(Json(state.group_service.remove_device(group, device).await?))
}

/// `POST /groups/delete`
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<GroupRef>,
) -> Result<DeleteResponse, ApiError> {
    let id: GroupId = parse_id(&req.group_id)?;
    state.group_service.delete(id).await?;
    Ok(DeleteResponse::NoContent)
}
