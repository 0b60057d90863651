//! `/api/activities` handlers.

use crate::api::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;
use autoops_core::{ActivityLog, ActivityService, SqliteActivityRepository};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateActivityRequest {
    pub user: String,
    pub action: String,
}

fn activity_service(conn: &Connection) -> ActivityService<SqliteActivityRepository<'_>> {
    ActivityService::new(SqliteActivityRepository::new(conn))
}

pub async fn list_activities(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ActivityLog>>>> {
    let logs = state
        .with_db(|conn| Ok(activity_service(conn).list_activities()?))
        .await?;
    Ok(Json(ApiResponse::success(
        logs,
        "Activity logs retrieved successfully",
    )))
}

pub async fn create_activity(
    State(state): State<AppState>,
    payload: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ActivityLog>>)> {
    let Json(request) = payload?;
    let log = state
        .with_db(move |conn| {
            Ok(activity_service(conn).record_activity(&request.user, &request.action)?)
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(log, "Activity log created successfully")),
    ))
}

pub async fn clear_activities(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state
        .with_db(|conn| Ok(activity_service(conn).clear_activities()?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
