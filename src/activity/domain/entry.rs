//! Audit entry and the closed set of recorded actions.

use super::ParseActivityActionError;
use crate::directory::domain::{ProjectId, UserId, UserRole};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLogId(Uuid);

impl ActivityLogId {
    /// Creates a new random entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ActivityLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    /// A task was created.
    Created,
    /// Task fields were updated.
    Update,
    /// A task was removed.
    Deleted,
    /// A task status changed to anything other than in-progress.
    StatusChanged,
    /// A task status changed to in-progress.
    InProgress,
    /// A comment was removed.
    CommentDeleted,
}

impl ActivityAction {
    /// Returns the canonical storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Update => "UPDATE",
            Self::Deleted => "DELETED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::InProgress => "IN_PROGRESS",
            Self::CommentDeleted => "COMMENT_DELETED",
        }
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "UPDATE" => Ok(Self::Update),
            "DELETED" => Ok(Self::Deleted),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMMENT_DELETED" => Ok(Self::CommentDeleted),
            _ => Err(ParseActivityActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit entry.
///
/// The role is the actor's role when the action happened, not a live
/// reference to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    id: ActivityLogId,
    user_id: UserId,
    role: UserRole,
    action: ActivityAction,
    task_id: TaskId,
    project_id: Option<ProjectId>,
    occurred_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityData {
    /// Persisted entry identifier.
    pub id: ActivityLogId,
    /// Persisted actor.
    pub user_id: UserId,
    /// Persisted actor role.
    pub role: UserRole,
    /// Persisted action.
    pub action: ActivityAction,
    /// Persisted target task.
    pub task_id: TaskId,
    /// Persisted project, when recorded.
    pub project_id: Option<ProjectId>,
    /// Persisted timestamp.
    pub occurred_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Records a new entry stamped with the clock's current time.
    #[must_use]
    pub fn record(
        user_id: UserId,
        role: UserRole,
        action: ActivityAction,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityLogId::new(),
            user_id,
            role,
            action,
            task_id,
            project_id: None,
            occurred_at: clock.utc(),
        }
    }

    /// Attaches the project the action happened in.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            role: data.role,
            action: data.action,
            task_id: data.task_id,
            project_id: data.project_id,
            occurred_at: data.occurred_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityLogId {
        self.id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the actor's role at the time of the action.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the project, when recorded.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
