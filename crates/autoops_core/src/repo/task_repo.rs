//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Titles are validated before any SQL mutation.
//! - Deletion only flips `is_deleted`; rows are never removed.

use crate::model::task::{normalize_task_title, TaskId, TaskItem, TASK_TITLE_MAX_CHARS};
use crate::model::validation::ValidationErrors;
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    is_completed,
    is_deleted
FROM tasks";

/// Repository interface for task persistence.
pub trait TaskRepository {
    fn create_task(&self, title: &str) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskItem>>;
    /// Lists tasks newest id first.
    fn list_tasks(&self, include_deleted: bool) -> RepoResult<Vec<TaskItem>>;
    fn mark_completed(&self, id: TaskId) -> RepoResult<()>;
    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, title: &str) -> RepoResult<TaskId> {
        let title = normalize_task_title(title)?;

        self.conn.execute(
            "INSERT INTO tasks (title, is_completed, is_deleted) VALUES (?1, 0, 0);",
            params![title.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE id = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id, bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, include_deleted: bool) -> RepoResult<Vec<TaskItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE (?1 = 1 OR is_deleted = 0)
             ORDER BY id DESC;"
        ))?;

        let mut rows = stmt.query(params![bool_to_int(include_deleted)])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn mark_completed(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_completed = 1,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?1 AND is_deleted = 0;",
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_deleted = 1,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?1;",
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskItem> {
    let title: String = row.get("title")?;
    if title.trim().is_empty() || title.chars().count() > TASK_TITLE_MAX_CHARS {
        return Err(RepoError::Validation(ValidationErrors::single(
            "title",
            format!("persisted title `{title}` violates title bounds"),
        )));
    }

    Ok(TaskItem {
        id: row.get("id")?,
        title,
        is_completed: int_to_bool(row.get("is_completed")?, "tasks.is_completed")?,
        is_deleted: int_to_bool(row.get("is_deleted")?, "tasks.is_deleted")?,
    })
}
