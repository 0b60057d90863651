//! Response envelope shared by every endpoint.

use serde::Serialize;

/// `{ success, message, data, errors }` wrapper around every response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Failure envelope; `errors` carries field-level messages when present.
    pub fn failure(message: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;

    #[test]
    fn failure_serializes_null_data() {
        let body = serde_json::to_value(ApiResponse::failure(
            "Validation failed",
            Some(vec!["Title is required".to_string()]),
        ))
        .unwrap();
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["errors"][0], "Title is required");
    }

    #[test]
    fn success_serializes_null_errors() {
        let body = serde_json::to_value(ApiResponse::success(3, "ok")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 3);
        assert!(body["errors"].is_null());
    }
}
