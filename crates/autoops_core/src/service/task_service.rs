//! Task use-case service.
//!
//! # Responsibility
//! - Provide list/create/complete/soft-delete entry points for tasks.
//! - Translate repository outcomes into task-level errors.
//!
//! # Invariants
//! - Completing a completed task is rejected, not silently accepted.
//! - Completing a soft-deleted task reports `NotFound`.
//! - Soft delete is idempotent for tasks that already carry a tombstone.

use crate::model::task::{TaskId, TaskItem};
use crate::model::validation::ValidationErrors;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input failed field validation.
    Validation(ValidationErrors),
    /// Target task does not exist (or is soft-deleted).
    NotFound(TaskId),
    /// Target task is already in its terminal completed state.
    AlreadyCompleted(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Task with ID {id} not found"),
            Self::AlreadyCompleted(id) => write!(f, "Task with ID {id} is already completed"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists visible tasks, newest first.
    pub fn list_tasks(&self) -> TaskServiceResult<Vec<TaskItem>> {
        Ok(self.repo.list_tasks(false)?)
    }

    /// Gets one visible task.
    pub fn get_task(&self, id: TaskId) -> TaskServiceResult<TaskItem> {
        self.repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Creates a task that starts open and visible.
    pub fn create_task(&self, title: &str) -> TaskServiceResult<TaskItem> {
        let id = self.repo.create_task(title)?;
        info!("event=task_create module=service status=ok task_id={id}");
        self.repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))
    }

    /// Marks a visible task as completed.
    pub fn complete_task(&self, id: TaskId) -> TaskServiceResult<TaskItem> {
        let task = self.get_task(id)?;
        if task.is_completed {
            return Err(TaskServiceError::AlreadyCompleted(id));
        }

        self.repo.mark_completed(id)?;
        info!("event=task_complete module=service status=ok task_id={id}");
        self.repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::InconsistentState(
                "completed task not found in read-back",
            ))
    }

    /// Soft-deletes a task by id.
    pub fn soft_delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repo.soft_delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }
}
