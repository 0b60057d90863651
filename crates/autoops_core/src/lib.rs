//! Core domain logic for the AutoOps backend.
//! This crate is the single source of truth for business invariants; the
//! HTTP crate only decodes requests and maps outcomes to status codes.

pub mod access;
pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod service;

pub use access::{access_for_role, login, AccessError, AccessProfile, PermissionLevel, Role};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{ActivityId, ActivityLog, NewActivity};
pub use model::task::{TaskId, TaskItem};
pub use model::validation::{FieldError, ValidationErrors};
pub use model::vehicle::{Vehicle, VehicleDraft, VehicleHealth, VehicleId};
pub use registry::seeder::{seed_vehicles, SEED_VEHICLE_COUNT};
pub use registry::summary::{summarize, DashboardSummary, DEFAULT_LATEST_COUNT};
pub use registry::vehicle_registry::{RegistryError, RegistryResult, VehicleRegistry};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::activity_service::ActivityService;
pub use service::task_service::{TaskService, TaskServiceError, TaskServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
