//! Repository port for task persistence and lookup.
//!
//! Every write carries the audit entry that describes it; implementations
//! commit both together or neither.

use crate::activity::{domain::ActivityLogEntry, ports::ActivityLogError};
use crate::directory::domain::UserId;
use crate::pagination::Page;
use crate::task::domain::{Task, TaskId, TaskQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and appends its creation entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::AuditAppend`] when the entry is
    /// rejected; nothing is written in either case.
    async fn store(&self, task: &Task, entry: &ActivityLogEntry) -> TaskRepositoryResult<()>;

    /// Replaces a task whose stored version equals `expected_version` and
    /// appends the entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no live task exists or
    /// [`TaskRepositoryError::ConcurrentModification`] when the stored
    /// version differs.
    async fn update(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()>;

    /// Appends the entry and persists the tombstoned task.
    ///
    /// # Errors
    ///
    /// Same as [`TaskRepository::update`].
    async fn remove(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()>;

    /// Finds a live task by identifier.
    ///
    /// Returns `None` when the task does not exist or was removed.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns live tasks created by the user, newest first.
    async fn find_by_creator(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns live tasks assigned to the user, newest first.
    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of live tasks matching the query.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Page<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored version no longer matches the version that was read.
    #[error("task {0} was modified concurrently")]
    ConcurrentModification(TaskId),

    /// The audit entry could not be appended.
    #[error("audit append failed: {0}")]
    AuditAppend(#[from] ActivityLogError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
