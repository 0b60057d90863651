//! `/api/access` role lookup and login.

use crate::api::ApiResponse;
use crate::error::ApiResult;
use autoops_core::{access_for_role, AccessProfile};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessQuery {
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub role: String,
    pub access_code: String,
}

pub async fn get_access(
    query: Result<Query<AccessQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<AccessProfile>>> {
    let Query(query) = query?;
    Ok(Json(ApiResponse::success(
        access_for_role(query.role.as_deref()),
        "Access retrieved successfully",
    )))
}

pub async fn login(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AccessProfile>>> {
    let Json(request) = payload?;
    let outcome = autoops_core::login(&request.role, &request.access_code);
    match &outcome {
        Ok(profile) => info!(
            "event=access_login module=api status=ok role={}",
            profile.role.key()
        ),
        Err(err) => info!("event=access_login module=api status=rejected reason={err}"),
    }
    Ok(Json(ApiResponse::success(outcome?, "Login successful")))
}
