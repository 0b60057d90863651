//! Durable storage for tasks and activity logs.
//!
//! Vehicles never land here; the registry keeps them in memory for the life
//! of the process. Everything behind this module is SQLite, versioned through
//! `PRAGMA user_version`, and a connection is handed out only after its schema
//! is current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap and query failures.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer AutoOps build; it is left untouched.
    SchemaTooNew { found: u32, supported: u32 },
    /// One named migration failed; nothing from the pending batch was kept.
    Migration {
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "autoops database is at schema {found}, this build understands up to {supported}"
            ),
            Self::Migration { name, source } => write!(f, "migration {name} failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
