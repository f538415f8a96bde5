//! Diesel row models for comment persistence.

use super::schema::comments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model used for reads, inserts, and full replacement.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub author_id: Option<uuid::Uuid>,
    /// Content.
    pub content: String,
    /// Parent comment.
    pub parent_id: Option<uuid::Uuid>,
    /// Edited flag.
    pub is_edited: bool,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}
