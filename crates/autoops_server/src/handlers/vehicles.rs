//! `/api/vehicles` handlers over the in-memory registry.

use crate::api::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use autoops_core::model::vehicle::UPDATED_JUST_NOW;
use autoops_core::{
    summarize, DashboardSummary, ValidationErrors, Vehicle, VehicleDraft, VehicleHealth,
    VehicleId, DEFAULT_LATEST_COUNT,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

/// Create/update payload. Every field but `vehicleName` has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRequest {
    pub vehicle_name: String,
    pub model: String,
    pub project: String,
    pub health: String,
    pub scc: i32,
    pub temp: i32,
    pub torque: i32,
    pub speed: i32,
    pub updated: String,
}

impl Default for VehicleRequest {
    fn default() -> Self {
        Self {
            vehicle_name: String::new(),
            model: String::new(),
            project: String::new(),
            health: VehicleHealth::Ok.as_str().to_string(),
            scc: 0,
            temp: 0,
            torque: 0,
            speed: 0,
            updated: UPDATED_JUST_NOW.to_string(),
        }
    }
}

impl VehicleRequest {
    /// Converts to a validated draft, reporting every bad field at once.
    pub fn into_draft(self) -> Result<VehicleDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let health = VehicleHealth::parse(&self.health).unwrap_or_else(|| {
            errors.push("health", "Health must be one of OK, WARN, ERROR");
            VehicleHealth::Ok
        });
        let draft = VehicleDraft {
            name: self.vehicle_name.trim().to_string(),
            model: self.model,
            project: self.project,
            health,
            scc: self.scc,
            temperature: self.temp,
            torque: self.torque,
            speed: self.speed,
            updated: self.updated,
        };
        if let Err(draft_errors) = draft.validate() {
            errors.merge(draft_errors);
        }
        errors.into_result().map(|()| draft)
    }
}

pub async fn list_vehicles(State(state): State<AppState>) -> Json<ApiResponse<Vec<Vehicle>>> {
    Json(ApiResponse::success(
        state.vehicles().snapshot(),
        "Vehicles retrieved successfully",
    ))
}

pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Json<ApiResponse<DashboardSummary>> {
    let snapshot = state.vehicles().snapshot();
    Json(ApiResponse::success(
        summarize(&snapshot, DEFAULT_LATEST_COUNT),
        "Dashboard summary retrieved successfully",
    ))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<VehicleId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<Vehicle>>> {
    let Path(id) = id?;
    let vehicle = state
        .vehicles()
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle with ID {id} not found")))?;
    Ok(Json(ApiResponse::success(
        vehicle,
        "Vehicle retrieved successfully",
    )))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vehicle>>)> {
    let Json(request) = payload?;
    let vehicle = state.vehicles().insert(request.into_draft()?)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vehicle, "Vehicle created successfully")),
    ))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<VehicleId>, PathRejection>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Vehicle>>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let vehicle = state.vehicles().update(id, request.into_draft()?)?;
    Ok(Json(ApiResponse::success(
        vehicle,
        "Vehicle updated successfully",
    )))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<VehicleId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.vehicles().remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
