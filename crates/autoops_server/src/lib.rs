//! HTTP surface for the AutoOps backend.
//!
//! # Responsibility
//! - Route `/api/*` requests to core services and the vehicle registry.
//! - Wrap every body in the `ApiResponse` envelope.
//! - Map core errors to status codes without leaking internal detail.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use api::ApiResponse;
pub use config::{ConfigError, DbLocation, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
