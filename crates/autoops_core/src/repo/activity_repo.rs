//! Activity log repository contract and SQLite implementation.

use crate::model::activity::{ActivityId, ActivityLog, NewActivity};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    user,
    action,
    strftime('%Y-%m-%d %H:%M:%S', time_ms / 1000, 'unixepoch') AS time
FROM activity_logs";

/// Repository interface for activity log persistence.
pub trait ActivityRepository {
    /// Inserts one log stamped with `time_ms` (epoch milliseconds, UTC).
    fn insert_activity(&self, activity: &NewActivity, time_ms: i64) -> RepoResult<ActivityId>;
    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<ActivityLog>>;
    /// Lists logs newest first.
    fn list_activities(&self) -> RepoResult<Vec<ActivityLog>>;
    /// Removes every log and returns how many rows were dropped.
    fn clear_activities(&self) -> RepoResult<usize>;
}

/// SQLite-backed activity log repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn insert_activity(&self, activity: &NewActivity, time_ms: i64) -> RepoResult<ActivityId> {
        self.conn.execute(
            "INSERT INTO activity_logs (user, action, time_ms) VALUES (?1, ?2, ?3);",
            params![activity.user.as_str(), activity.action.as_str(), time_ms],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<ActivityLog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }
        Ok(None)
    }

    fn list_activities(&self) -> RepoResult<Vec<ActivityLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL} ORDER BY time_ms DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_activity_row(row)?);
        }
        Ok(logs)
    }

    fn clear_activities(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM activity_logs;", [])?;
        Ok(removed)
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<ActivityLog> {
    Ok(ActivityLog {
        id: row.get("id")?,
        user: row.get("user")?,
        action: row.get("action")?,
        time: row.get("time")?,
    })
}
