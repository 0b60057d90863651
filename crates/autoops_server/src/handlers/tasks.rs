//! `/api/tasks` handlers over the SQLite task service.

use crate::api::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;
use autoops_core::{SqliteTaskRepository, TaskId, TaskItem, TaskService};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub title: String,
}

fn task_service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::new(conn))
}

pub async fn list_tasks(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<TaskItem>>>> {
    let tasks = state
        .with_db(|conn| Ok(task_service(conn).list_tasks()?))
        .await?;
    Ok(Json(ApiResponse::success(
        tasks,
        "Tasks retrieved successfully",
    )))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TaskItem>>)> {
    let Json(request) = payload?;
    let task = state
        .with_db(move |conn| Ok(task_service(conn).create_task(&request.title)?))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(task, "Task created successfully")),
    ))
}

pub async fn complete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<TaskItem>>> {
    let Path(id) = id?;
    let task = state
        .with_db(move |conn| Ok(task_service(conn).complete_task(id)?))
        .await?;
    Ok(Json(ApiResponse::success(
        task,
        "Task marked as completed",
    )))
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state
        .with_db(move |conn| Ok(task_service(conn).soft_delete_task(id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::{complete_task, create_task, delete_task, list_tasks, CreateTaskRequest};
    use crate::error::ApiError;
    use crate::state::AppState;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Json;

    async fn create(state: &AppState, title: &str) -> i64 {
        let (_, Json(body)) = create_task(
            State(state.clone()),
            Ok(Json(CreateTaskRequest {
                title: title.to_string(),
            })),
        )
        .await
        .unwrap();
        body.data.unwrap().id
    }

    #[tokio::test]
    async fn complete_flow_and_terminal_state() {
        let state = AppState::in_memory().unwrap();
        let id = create(&state, "Connect frontend to API").await;

        let done = complete_task(State(state.clone()), Ok(Path(id)))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert!(done.is_completed);

        let err = complete_task(State(state), Ok(Path(id))).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_hides_task_from_list() {
        let state = AppState::in_memory().unwrap();
        let kept = create(&state, "keep").await;
        let dropped = create(&state, "drop").await;

        let status = delete_task(State(state.clone()), Ok(Path(dropped)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let tasks = list_tasks(State(state.clone())).await.unwrap().0.data.unwrap();
        let ids: Vec<_> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![kept]);

        let err = delete_task(State(state), Ok(Path(999))).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_title_is_a_validation_error() {
        let state = AppState::in_memory().unwrap();
        let err = create_task(State(state), Ok(Json(CreateTaskRequest::default())))
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(errors) => assert_eq!(errors, vec!["Title is required"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
