//! Task aggregate root and related lifecycle types.

use super::{ParseTaskPriorityError, ParseTaskStatusError, TaskId, TaskTitle};
use crate::directory::domain::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// Any status may follow any other; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task exists but work has not started.
    #[default]
    NotStarted,
    /// Task is being worked on.
    InProgress,
    /// Task work is finished.
    Completed,
    /// Task is closed without further work.
    Closed,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Completed,
        Self::Closed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_started" | "open" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    created_by: UserId,
    assigned_to: Option<UserId>,
    project_id: ProjectId,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a new task from resolved references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Validated title.
    pub title: TaskTitle,
    /// Free-form description.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Resolved creator.
    pub created_by: UserId,
    /// Resolved assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Resolved owning project.
    pub project_id: ProjectId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted assignee reference.
    pub assigned_to: Option<UserId>,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial set of resolved field changes.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement creator.
    pub created_by: Option<UserId>,
    /// Replacement assignee.
    pub assigned_to: Option<UserId>,
    /// Replacement owning project.
    pub project_id: Option<ProjectId>,
}

impl Task {
    /// Creates a new task at version 1.
    #[must_use]
    pub fn new(data: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            project_id: data.project_id,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            project_id: data.project_id,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete timestamp, if the task was removed.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` once the task has been soft-removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Overwrites the supplied fields and keeps every other value.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            due_date,
            created_by,
            assigned_to,
            project_id,
        } = changes;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = created_by {
            self.created_by = value;
        }
        if assigned_to.is_some() {
            self.assigned_to = assigned_to;
        }
        if let Some(value) = project_id {
            self.project_id = value;
        }
        self.touch(clock);
    }

    /// Sets the status unconditionally.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Tombstones the task.
    pub fn mark_removed(&mut self, clock: &impl Clock) {
        self.touch(clock);
        self.deleted_at = Some(self.updated_at);
    }

    /// Advances the update timestamp and the version.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}
