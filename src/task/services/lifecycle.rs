//! Service layer for task creation, updates, status changes, and removal.

use super::{CreateTaskRequest, UpdateTaskRequest, UpdateTaskStatusRequest};
use crate::activity::domain::{ActivityAction, ActivityLogEntry};
use crate::directory::{
    domain::{ProjectId, User, UserId},
    ports::{DirectoryError, ProjectDirectory, UserDirectory},
};
use crate::error::ErrorKind;
use crate::pagination::Page;
use crate::task::{
    domain::{
        NewTask, ParseTaskStatusError, Task, TaskChanges, TaskDomainError, TaskId, TaskQuery,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The task does not exist or was removed.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// No user has the supplied creator name.
    #[error("creator not found: {0}")]
    CreatorNotFound(String),
    /// No user has the supplied assignee name.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(String),
    /// A stored task references a creator the directory no longer knows.
    #[error("creator {creator} of task {task_id} no longer resolves")]
    MissingCreator {
        /// Affected task.
        task_id: TaskId,
        /// Dangling creator reference.
        creator: UserId,
    },
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidStatus(_) => ErrorKind::BadRequest,
            Self::TaskNotFound(_)
            | Self::ProjectNotFound(_)
            | Self::CreatorNotFound(_)
            | Self::AssigneeNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::MissingCreator { .. } => ErrorKind::Fatal,
            Self::Repository(
                TaskRepositoryError::ConcurrentModification(_)
                | TaskRepositoryError::DuplicateTask(_),
            ) => ErrorKind::Conflict,
            Self::Directory(_)
            | Self::Repository(
                TaskRepositoryError::AuditAppend(_) | TaskRepositoryError::Persistence(_),
            ) => ErrorKind::Storage,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Sole writer of task records and of the task audit actions.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, P, C>
where
    R: TaskRepository,
    U: UserDirectory,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<R, U, P, C> TaskLifecycleService<R, U, P, C>
where
    R: TaskRepository,
    U: UserDirectory,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            projects,
            clock,
        }
    }

    /// Creates a task and records `CREATED`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an empty title, then
    /// [`TaskLifecycleError::ProjectNotFound`],
    /// [`TaskLifecycleError::CreatorNotFound`], or
    /// [`TaskLifecycleError::AssigneeNotFound`] in that order.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        self.require_project(request.project_id).await?;
        let creator = self.resolve_creator(&request.creator_name).await?;
        let assignee = match supplied(request.assignee_name) {
            Some(name) => Some(self.resolve_assignee(&name).await?),
            None => None,
        };

        let task = Task::new(
            NewTask {
                title,
                description: request.description,
                status: request.status.unwrap_or_default(),
                priority: request.priority.unwrap_or_default(),
                due_date: request.due_date,
                created_by: creator.id(),
                assigned_to: assignee.as_ref().map(User::id),
                project_id: request.project_id,
            },
            &*self.clock,
        );
        let entry = ActivityLogEntry::record(
            creator.id(),
            creator.role(),
            ActivityAction::Created,
            task.id(),
            &*self.clock,
        )
        .with_project(task.project_id());

        self.repository.store(&task, &entry).await?;
        info!(task_id = %task.id(), action = %entry.action(), "task created");
        Ok(task)
    }

    /// Applies the supplied fields and records `UPDATE` against the task's
    /// creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`], then
    /// [`TaskLifecycleError::Domain`] for a blank title, a resolution failure
    /// for the supplied project or names, or
    /// [`TaskLifecycleError::MissingCreator`] when the kept creator no longer
    /// resolves.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(request.task_id).await?;
        let expected_version = task.version();
        let title = request.title.map(TaskTitle::new).transpose()?;

        if let Some(project_id) = request.project_id {
            self.require_project(project_id).await?;
        }
        let new_creator = match supplied(request.creator_name) {
            Some(name) => Some(self.resolve_creator(&name).await?),
            None => None,
        };
        let new_assignee = match supplied(request.assignee_name) {
            Some(name) => Some(self.resolve_assignee(&name).await?),
            None => None,
        };

        task.apply_changes(
            TaskChanges {
                title,
                description: request.description,
                status: request.status,
                priority: request.priority,
                due_date: request.due_date,
                created_by: new_creator.as_ref().map(User::id),
                assigned_to: new_assignee.as_ref().map(User::id),
                project_id: request.project_id,
            },
            &*self.clock,
        );
        let creator = match new_creator {
            Some(creator) => creator,
            None => self.stored_creator(&task).await?,
        };
        let entry = ActivityLogEntry::record(
            creator.id(),
            creator.role(),
            ActivityAction::Update,
            task.id(),
            &*self.clock,
        );

        self.repository
            .update(&task, expected_version, &entry)
            .await?;
        info!(task_id = %task.id(), action = %entry.action(), "task updated");
        Ok(task)
    }

    /// Sets the status and records `IN_PROGRESS` or `STATUS_CHANGED`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown text,
    /// [`TaskLifecycleError::TaskNotFound`], or
    /// [`TaskLifecycleError::MissingCreator`].
    pub async fn update_status(
        &self,
        request: UpdateTaskStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        let status = TaskStatus::try_from(request.status.as_str())?;
        let mut task = self.require_task(request.task_id).await?;
        let expected_version = task.version();
        let creator = self.stored_creator(&task).await?;

        task.set_status(status, &*self.clock);
        let action = if status == TaskStatus::InProgress {
            ActivityAction::InProgress
        } else {
            ActivityAction::StatusChanged
        };
        let entry =
            ActivityLogEntry::record(creator.id(), creator.role(), action, task.id(), &*self.clock);

        self.repository
            .update(&task, expected_version, &entry)
            .await?;
        info!(task_id = %task.id(), %action, status = status.as_str(), "task status changed");
        Ok(task)
    }

    /// Records `DELETED` and tombstones the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or
    /// [`TaskLifecycleError::MissingCreator`].
    pub async fn remove(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let mut task = self.require_task(task_id).await?;
        let expected_version = task.version();
        let creator = self.stored_creator(&task).await?;

        let entry = ActivityLogEntry::record(
            creator.id(),
            creator.role(),
            ActivityAction::Deleted,
            task_id,
            &*self.clock,
        );
        task.mark_removed(&*self.clock);

        self.repository
            .remove(&task, expected_version, &entry)
            .await?;
        info!(%task_id, action = %entry.action(), "task removed");
        Ok(())
    }

    /// Finds a live task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns tasks created by the named user; an unknown name yields none.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Directory`] or
    /// [`TaskLifecycleError::Repository`] when a lookup fails.
    pub async fn find_by_creator_name(&self, name: &str) -> TaskLifecycleResult<Vec<Task>> {
        let Some(user) = self.users.find_by_name(name).await? else {
            debug!(name, "no user with that name");
            return Ok(Vec::new());
        };
        Ok(self.repository.find_by_creator(user.id()).await?)
    }

    /// Returns tasks assigned to the named user; an unknown name yields none.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Directory`] or
    /// [`TaskLifecycleError::Repository`] when a lookup fails.
    pub async fn find_by_assignee_name(&self, name: &str) -> TaskLifecycleResult<Vec<Task>> {
        let Some(user) = self.users.find_by_name(name).await? else {
            debug!(name, "no user with that name");
            return Ok(Vec::new());
        };
        Ok(self.repository.find_by_assignee(user.id()).await?)
    }

    /// Returns one page of tasks matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list(&self, query: &TaskQuery) -> TaskLifecycleResult<Page<Task>> {
        let page = self.repository.list(query).await?;
        debug!(total = page.total, returned = page.items.len(), "listed tasks");
        Ok(page)
    }

    async fn require_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn require_project(&self, project_id: ProjectId) -> TaskLifecycleResult<()> {
        self.projects
            .find_by_id(project_id)
            .await?
            .map(|_| ())
            .ok_or(TaskLifecycleError::ProjectNotFound(project_id))
    }

    async fn resolve_creator(&self, name: &str) -> TaskLifecycleResult<User> {
        self.users
            .find_by_name(name)
            .await?
            .ok_or_else(|| TaskLifecycleError::CreatorNotFound(name.to_owned()))
    }

    async fn resolve_assignee(&self, name: &str) -> TaskLifecycleResult<User> {
        self.users
            .find_by_name(name)
            .await?
            .ok_or_else(|| TaskLifecycleError::AssigneeNotFound(name.to_owned()))
    }

    async fn stored_creator(&self, task: &Task) -> TaskLifecycleResult<User> {
        let creator = task.created_by();
        match UserDirectory::find_by_id(&*self.users, creator).await? {
            Some(user) => Ok(user),
            None => {
                error!(task_id = %task.id(), %creator, "task creator no longer resolves");
                Err(TaskLifecycleError::MissingCreator {
                    task_id: task.id(),
                    creator,
                })
            }
        }
    }
}

/// Treats blank names as not supplied.
fn supplied(name: Option<String>) -> Option<String> {
    name.filter(|value| !value.trim().is_empty())
}
