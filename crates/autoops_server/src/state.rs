//! Shared application state injected into every handler.

use crate::error::{ApiError, ApiResult};
use autoops_core::db::{open_db_in_memory, DbResult};
use autoops_core::VehicleRegistry;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// One registry and one SQLite connection per process.
#[derive(Clone)]
pub struct AppState {
    vehicles: Arc<VehicleRegistry>,
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(vehicles: VehicleRegistry, conn: Connection) -> Self {
        Self {
            vehicles: Arc::new(vehicles),
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Randomly seeded registry over a private in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(VehicleRegistry::new(), open_db_in_memory()?))
    }

    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    /// Runs `work` on the blocking pool while holding the connection lock.
    pub async fn with_db<T, F>(&self, work: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ApiResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::unexpected("database connection lock poisoned"))?;
            work(&conn)
        })
        .await
        .map_err(|err| ApiError::unexpected(format!("database task failed: {err}")))?
    }
}
