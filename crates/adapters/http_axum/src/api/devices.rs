//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hubdesk_domain::device::{Device, DeviceStatus, DeviceType, DeviceUpdate, NearbyQuery};
use hubdesk_domain::id::DeviceId;

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, Ports};

/// Request body for `POST /devices/register` and `POST /devices/add`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub hub: String,
    pub address: String,
    pub device_type: Option<DeviceType>,
}

/// Request body for `POST /devices/nearby`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRequest {
    pub hub: String,
    pub address_prefix: Option<String>,
    pub device_type: Option<DeviceType>,
}

/// Request body for `POST /devices`.
#[derive(Deserialize)]
pub struct ListRequest {
    pub hub: String,
}

/// Request body for `POST /devices/update`. Absent fields are left unchanged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub address: Option<String>,
    pub status: Option<DeviceStatus>,
    pub device_type: Option<DeviceType>,
    pub groups: Option<Vec<String>>,
}

/// Request body for `POST /devices/delete`.
#[derive(Deserialize)]
pub struct DeviceRef {
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

/// Possible responses from the create endpoints.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
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

/// `POST /devices/register`: a device a hub has discovered.
pub async fn register<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError> {
    let device = state
        .device_service
        .register(&req.address, &req.hub, req.device_type)
        .await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `POST /devices/nearby`
pub async fn nearby<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<NearbyRequest>,
) -> Result<ListResponse, ApiError> {
    let query = NearbyQuery {
        hub: req.hub,
        address_prefix: req.address_prefix,
        device_type: req.device_type,
    };
    let devices = state.device_service.list_nearby(&query).await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `POST /devices/add`: a device adopted by a user.
pub async fn add<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError> {
    let device = state
        .device_service
        .add(&req.hub, &req.address, req.device_type)
        .await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `POST /devices`
pub async fn list<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<ListRequest>,
) -> Result<ListResponse, ApiError> {
    let devices = state.device_service.list_all(&req.hub).await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /devices/{deviceID}`
pub async fn get<P: Ports>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let id: DeviceId = parse_id(&id)?;
    let device = state.device_service.get(id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /devices/update`
pub async fn update<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<UpdateDeviceRequest>,
) -> Result<GetResponse, ApiError> {
    let id: DeviceId = parse_id(&req.device_id)?;
    let update = DeviceUpdate {
        address: req.address,
        status: req.status,
        device_type: req.device_type,
        groups: req.groups,
    };
    let device = state.device_service.update(id, update).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /devices/delete`
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<DeviceRef>,
) -> Result<DeleteResponse, ApiError> {
    let id: DeviceId = parse_id(&req.device_id)?;
    state.device_service.delete(id).await?;
    Ok(DeleteResponse::NoContent)
}
