//! Route table and request logging.

use crate::error::ApiError;
use crate::handlers::{access, activities, health, tasks, vehicles};
use crate::state::AppState;
use axum::extract::Request;
use axum::http::{header, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use log::{info, warn};
use std::time::Instant;

/// Builds the full `/api` router over `state`.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/vehicles/dashboard-summary",
            get(vehicles::dashboard_summary),
        )
        .route(
            "/vehicles/:id",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/:id", delete(tasks::delete_task))
        .route("/tasks/:id/complete", patch(tasks::complete_task))
        .route(
            "/activities",
            get(activities::list_activities)
                .post(activities::create_activity)
                .delete(activities::clear_activities),
        )
        .route("/access", get(access::get_access))
        .route("/access/login", post(access::login));

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

// The router answers an unsupported method with a bare 405; rebuild it as an
// envelope and keep the `Allow` header.
fn method_not_allowed(original: Response, method: &Method, path: &str) -> Response {
    let allow = original.headers().get(header::ALLOW).cloned();
    let mut response =
        ApiError::MethodNotAllowed(format!("Method {method} is not allowed for {path}"))
            .into_response();
    if let Some(allow) = allow {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        response = method_not_allowed(response, &method, &path);
    }
    let status = response.status().as_u16();
    let duration_ms = started_at.elapsed().as_millis();
    if response.status().is_server_error() {
        warn!(
            "event=http_request module=api status=error method={method} path={path} http_status={status} duration_ms={duration_ms}"
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={method} path={path} http_status={status} duration_ms={duration_ms}"
        );
    }
    response
}
