//! Diesel row models for audit persistence.

use super::schema::activity_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for audit entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activity_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityLogRow {
    /// Append sequence.
    pub seq: i64,
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Actor role label.
    pub role: String,
    /// Action label.
    pub action: String,
    /// Target task.
    pub task_id: uuid::Uuid,
    /// Recorded project.
    pub project_id: Option<uuid::Uuid>,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
}

/// Insert model for audit entries; the sequence is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_logs)]
pub struct NewActivityLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Actor role label.
    pub role: String,
    /// Action label.
    pub action: String,
    /// Target task.
    pub task_id: uuid::Uuid,
    /// Recorded project.
    pub project_id: Option<uuid::Uuid>,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
}
