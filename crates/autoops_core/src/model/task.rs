//! Task domain model.
//!
//! # Invariants
//! - `title` is trimmed, non-empty and at most `TASK_TITLE_MAX_CHARS` long.
//! - `is_deleted` is the tombstone flag; deleted tasks are never listed.
//! - A completed task cannot be completed again.

use crate::model::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Storage-assigned task identifier.
pub type TaskId = i64;

pub const TASK_TITLE_MAX_CHARS: usize = 200;

/// Persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: TaskId,
    pub title: String,
    pub is_completed: bool,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

/// Normalizes and validates a task title for creation.
pub fn normalize_task_title(title: &str) -> Result<String, ValidationErrors> {
    let trimmed = title.trim();
    let mut errors = ValidationErrors::new();
    if trimmed.is_empty() {
        errors.push("title", "Title is required");
    } else if trimmed.chars().count() > TASK_TITLE_MAX_CHARS {
        errors.push(
            "title",
            format!("Title must be between 1 and {TASK_TITLE_MAX_CHARS} characters"),
        );
    }
    errors.into_result().map(|()| trimmed.to_string())
}
