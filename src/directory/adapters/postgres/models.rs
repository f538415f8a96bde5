//! Diesel row models for directory lookups.

use super::schema::{projects, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role label.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
}
