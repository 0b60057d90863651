use crate::api::ApiResponse;
use axum::Json;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// Epoch milliseconds, UTC.
    pub timestamp: u64,
}

pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    Json(ApiResponse::success(
        HealthStatus {
            status: "ok",
            timestamp,
        },
        "API is healthy",
    ))
}
