//! JSON REST handlers for automations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hubdesk_domain::automation::{Automation, DispatchReport, Setting};
use hubdesk_domain::id::{AutomationId, DeviceId};

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, Ports};

/// Request body for `POST /automations/add`.
#[derive(Deserialize)]
pub struct CreateAutomationRequest {
    pub name: String,
    pub hub: String,
}

/// Request body for `POST /automations/addDevice`.
#[derive(Deserialize)]
pub struct AddDirectiveRequest {
    #[serde(rename = "automationID")]
    pub automation_id: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub setting: Setting,
}

/// Request body for `POST /automations/removeDevice`.
#[derive(Deserialize)]
pub struct RemoveDirectiveRequest {
    #[serde(rename = "automationID")]
    pub automation_id: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

/// Request body for endpoints addressing a single automation.
#[derive(Deserialize)]
pub struct AutomationRef {
    #[serde(rename = "automationID")]
    pub automation_id: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Automation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and directive endpoints.
pub enum GetResponse {
    Ok(Json<Automation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Automation>),
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

/// `POST /automations/add`
pub async fn add<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<CreateAutomationRequest>,
) -> Result<CreateResponse, ApiError> {
    let automation = state.automation_service.add(&req.name, &req.hub).await?;
    Ok(CreateResponse::Created(Json(automation)))
}

/// `POST /automations`
pub async fn list<P: Ports>(State(state): State<AppState<P>>) -> Result<ListResponse, ApiError> {
    let automations = state.automation_service.list_all().await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `GET /automations/{automationID}`
pub async fn get<P: Ports>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let id: AutomationId = parse_id(&id)?;
    let automation = state.automation_service.get(id).await?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /automations/addDevice`
pub async fn add_device<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<AddDirectiveRequest>,
) -> Result<GetResponse, ApiError> {
    let id: AutomationId = parse_id(&req.automation_id)?;
    let device: DeviceId = parse_id(&req.device_id)?;
    let automation = state
        .automation_service
        .add_device(id, device, req.setting)
        .await?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /automations/removeDevice`
pub async fn remove_device<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<RemoveDirectiveRequest>,
) -> Result<GetResponse, ApiError> {
    let id: AutomationId = parse_id(&req.automation_id)?;
    let automation = match req.device_id.trim().parse::<DeviceId>() {
        Ok(device) => state.automation_service.remove_device(id, device).await?,
        Err(_) => state.automation_service.get(id).await?,
    };
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /automations/send`: best-effort dispatch, reported per directive.
pub async fn send<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<AutomationRef>,
) -> Result<Json<DispatchReport>, ApiError> {
    let id: AutomationId = parse_id(&req.automation_id)?;
    let report = state.automation_service.send_commands(id).await?;
    Ok(Json(report))
}

/// `POST /automations/delete`
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    ApiJson(req): ApiJson<AutomationRef>,
) -> Result<DeleteResponse, ApiError> {
    let id: AutomationId = parse_id(&req.automation_id)?;
    state.automation_service.delete(id).await?;
    Ok(DeleteResponse::NoContent)
}
