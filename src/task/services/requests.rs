//! Request payloads accepted by the task lifecycle service.

use crate::directory::domain::ProjectId;
use crate::task::domain::{TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
///
/// Users are referenced by display name and resolved through the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: Option<TaskStatus>,
    pub(super) priority: Option<TaskPriority>,
    pub(super) due_date: DateTime<Utc>,
    pub(super) creator_name: String,
    pub(super) assignee_name: Option<String>,
    pub(super) project_id: ProjectId,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
        creator_name: impl Into<String>,
        project_id: ProjectId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: None,
            priority: None,
            due_date,
            creator_name: creator_name.into(),
            assignee_name: None,
            project_id,
        }
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assigns the task to the named user.
    #[must_use]
    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.assignee_name = Some(name.into());
        self
    }
}

/// Partial update of a task's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) status: Option<TaskStatus>,
    pub(super) priority: Option<TaskPriority>,
    pub(super) due_date: Option<DateTime<Utc>>,
    pub(super) project_id: Option<ProjectId>,
    pub(super) creator_name: Option<String>,
    pub(super) assignee_name: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
            project_id: None,
            creator_name: None,
            assignee_name: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Reassigns the creator to the named user.
    #[must_use]
    pub fn with_creator(mut self, name: impl Into<String>) -> Self {
        self.creator_name = Some(name.into());
        self
    }

    /// Reassigns the task to the named user.
    #[must_use]
    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.assignee_name = Some(name.into());
        self
    }
}

/// Status change with the new status given as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    pub(super) task_id: TaskId,
    pub(super) status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}
