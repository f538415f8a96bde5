//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status label.
    pub status: String,
    /// Priority label.
    pub priority: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert and full-replace model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status label.
    pub status: String,
    /// Priority label.
    pub priority: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}
