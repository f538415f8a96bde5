//! Boundary service for appending and reading audit entries.

use crate::activity::{
    domain::{ActivityAction, ActivityLogEntry, ParseActivityActionError},
    ports::{ActivityLogError, ActivityLogRepository},
};
use crate::directory::domain::{ParseUserRoleError, ProjectId, UserId, UserRole};
use crate::error::ErrorKind;
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for appending an entry with textual role and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendActivityRequest {
    user_id: UserId,
    role: String,
    action: String,
    task_id: TaskId,
    project_id: Option<ProjectId>,
}

impl AppendActivityRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        user_id: UserId,
        role: impl Into<String>,
        action: impl Into<String>,
        task_id: TaskId,
    ) -> Self {
        Self {
            user_id,
            role: role.into(),
            action: action.into(),
            task_id,
            project_id: None,
        }
    }

    /// Records the project the action happened in.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Service-level errors for audit operations.
#[derive(Debug, Error)]
pub enum ActivityServiceError {
    /// The role is outside the closed set.
    #[error(transparent)]
    InvalidRole(#[from] ParseUserRoleError),
    /// The action is outside the closed set.
    #[error(transparent)]
    InvalidAction(#[from] ParseActivityActionError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ActivityLogError),
}

impl ActivityServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRole(_) | Self::InvalidAction(_) => ErrorKind::BadRequest,
            Self::Repository(ActivityLogError::DuplicateEntry(_)) => ErrorKind::Conflict,
            Self::Repository(ActivityLogError::Persistence(_)) => ErrorKind::Storage,
        }
    }
}

/// Result type for audit service operations.
pub type ActivityServiceResult<T> = Result<T, ActivityServiceError>;

/// Audit trail orchestration service.
#[derive(Clone)]
pub struct ActivityLogService<R, C>
where
    R: ActivityLogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ActivityLogService<R, C>
where
    R: ActivityLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new audit service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Parses the request and appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityServiceError::InvalidRole`] or
    /// [`ActivityServiceError::InvalidAction`] before anything is written, or
    /// [`ActivityServiceError::Repository`] when the append fails.
    pub async fn append(
        &self,
        request: AppendActivityRequest,
    ) -> ActivityServiceResult<ActivityLogEntry> {
        let role = UserRole::try_from(request.role.as_str())?;
        let action = ActivityAction::try_from(request.action.as_str())?;
        let mut entry =
            ActivityLogEntry::record(request.user_id, role, action, request.task_id, &*self.clock);
        if let Some(project_id) = request.project_id {
            entry = entry.with_project(project_id);
        }
        self.repository.append(&entry).await?;
        info!(task_id = %entry.task_id(), action = %entry.action(), "activity appended");
        Ok(entry)
    }

    /// Returns every entry in append order.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityServiceError::Repository`] when the read fails.
    pub async fn list_all(&self) -> ActivityServiceResult<Vec<ActivityLogEntry>> {
        let entries = self.repository.list_all().await?;
        debug!(count = entries.len(), "listed activity");
        Ok(entries)
    }

    /// Returns one task's entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityServiceError::Repository`] when the read fails.
    pub async fn list_by_task(&self, task_id: TaskId) -> ActivityServiceResult<Vec<ActivityLogEntry>> {
        let entries = self.repository.list_by_task(task_id).await?;
        debug!(%task_id, count = entries.len(), "listed task activity");
        Ok(entries)
    }
}
