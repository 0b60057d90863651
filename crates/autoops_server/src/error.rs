//! Boundary error type and its HTTP mapping.
//!
//! # Invariants
//! - `NotFound -> 404`, `Validation -> 400`, `InvalidState -> 400`,
//!   `Unauthorized -> 401`, `MethodNotAllowed -> 405`, everything else `500`.
//! - `Unexpected` detail is logged, never returned to the caller.

use crate::api::ApiResponse;
use autoops_core::db::DbError;
use autoops_core::logging::sanitize_message;
use autoops_core::{
    AccessError, RegistryError, RepoError, TaskServiceError, ValidationErrors,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use std::fmt::{Display, Formatter};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An error occurred while processing your request.";
const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
const MAX_LOGGED_DETAIL_CHARS: usize = 300;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(Vec<String>),
    /// Entity is already in a terminal state (e.g. completed task).
    InvalidState(String),
    Unauthorized(String),
    MethodNotAllowed(String),
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unexpected(detail: impl Display) -> Self {
        Self::Unexpected(detail.to_string())
    }

    fn envelope(&self) -> ApiResponse<()> {
        match self {
            Self::NotFound(message)
            | Self::InvalidState(message)
            | Self::Unauthorized(message)
            | Self::MethodNotAllowed(message) => ApiResponse::failure(message.as_str(), None),
            Self::Validation(errors) => {
                ApiResponse::failure(VALIDATION_FAILED_MESSAGE, Some(errors.clone()))
            }
            Self::Unexpected(_) => ApiResponse::failure(UNEXPECTED_ERROR_MESSAGE, None),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message)
            | Self::InvalidState(message)
            | Self::Unauthorized(message)
            | Self::MethodNotAllowed(message) => f.write_str(message),
            Self::Validation(errors) => write!(f, "validation failed: {}", errors.join("; ")),
            Self::Unexpected(detail) => write!(f, "unexpected error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Unexpected(detail) = &self {
            error!(
                "event=http_error module=api status=error error_code=unexpected detail={}",
                sanitize_message(detail, MAX_LOGGED_DETAIL_CHARS)
            );
        }
        (status, Json(self.envelope())).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.messages())
    }
}

impl From<RegistryError> for ApiError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::NotFound(_) => Self::NotFound(value.to_string()),
            RegistryError::Validation(errors) => errors.into(),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::NotFound(_) => Self::NotFound(value.to_string()),
            TaskServiceError::AlreadyCompleted(_) => Self::InvalidState(value.to_string()),
            TaskServiceError::Validation(errors) => errors.into(),
            other => Self::unexpected(other),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(format!("Record with ID {id} not found")),
            RepoError::Validation(errors) => errors.into(),
            other => Self::unexpected(other),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::unexpected(value)
    }
}

impl From<AccessError> for ApiError {
    fn from(value: AccessError) -> Self {
        match value {
            AccessError::MissingCredentials => Self::Validation(vec![value.to_string()]),
            AccessError::UnknownRole | AccessError::InvalidAccessCode => {
                Self::Unauthorized(value.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(vec![value.body_text()])
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Validation(vec![value.body_text()])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Validation(vec![value.body_text()])
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, UNEXPECTED_ERROR_MESSAGE};
    use autoops_core::{AccessError, RegistryError, TaskServiceError, ValidationErrors};
    use axum::http::StatusCode;

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let cases = [
            (ApiError::from(RegistryError::NotFound(4)), StatusCode::NOT_FOUND),
            (
                ApiError::from(TaskServiceError::AlreadyCompleted(2)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ValidationErrors::single("title", "Title is required")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(AccessError::InvalidAccessCode),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(AccessError::MissingCredentials),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::MethodNotAllowed("Method PATCH not allowed".to_string()),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                ApiError::from(TaskServiceError::InconsistentState("lost row")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }

    #[test]
    fn unexpected_envelope_hides_detail() {
        let error = ApiError::unexpected("disk I/O error at /var/db");
        let envelope = error.envelope();
        assert_eq!(envelope.message, UNEXPECTED_ERROR_MESSAGE);
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn not_found_message_names_the_id() {
        let error = ApiError::from(RegistryError::NotFound(77));
        assert_eq!(error.envelope().message, "Vehicle with ID 77 not found");
    }
}
