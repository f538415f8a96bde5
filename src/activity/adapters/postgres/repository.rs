//! `PostgreSQL` repository implementation for the audit trail.

use super::{
    models::{ActivityLogRow, NewActivityLogRow},
    schema::activity_logs,
};
use crate::activity::{
    domain::{ActivityAction, ActivityLogEntry, ActivityLogId, PersistedActivityData},
    ports::{ActivityLogError, ActivityLogRepository, ActivityLogResult},
};
use crate::db::PgPool;
use crate::directory::domain::{ProjectId, UserId, UserRole};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed audit trail.
#[derive(Debug, Clone)]
pub struct PostgresActivityLog {
    pool: PgPool,
}

impl PostgresActivityLog {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityLogError::persistence)?
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let entry = entry.clone();
        self.run_blocking(move |connection| insert_entry(connection, &entry))
            .await
    }

    async fn list_all(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        self.run_blocking(|connection| {
            activity_logs::table
                .order(activity_logs::seq.asc())
                .select(ActivityLogRow::as_select())
                .load::<ActivityLogRow>(connection)
                .map_err(ActivityLogError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        self.run_blocking(move |connection| {
            activity_logs::table
                .filter(activity_logs::task_id.eq(task_id.into_inner()))
                .order((activity_logs::occurred_at.desc(), activity_logs::seq.desc()))
                .select(ActivityLogRow::as_select())
                .load::<ActivityLogRow>(connection)
                .map_err(ActivityLogError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }
}

/// Inserts one entry on an existing connection.
///
/// Task and comment writers call this inside their own transaction so the
/// entry commits or rolls back with their change.
pub(crate) fn insert_entry(
    connection: &mut PgConnection,
    entry: &ActivityLogEntry,
) -> ActivityLogResult<()> {
    diesel::insert_into(activity_logs::table)
        .values(&to_new_row(entry))
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ActivityLogError::DuplicateEntry(entry.id())
            }
            _ => ActivityLogError::persistence(err),
        })?;
    Ok(())
}

fn to_new_row(entry: &ActivityLogEntry) -> NewActivityLogRow {
    NewActivityLogRow {
        id: entry.id().into_inner(),
        user_id: entry.user_id().into_inner(),
        role: entry.role().as_str().to_owned(),
        action: entry.action().as_str().to_owned(),
        task_id: entry.task_id().into_inner(),
        project_id: entry.project_id().map(ProjectId::into_inner),
        occurred_at: entry.occurred_at(),
    }
}

fn row_to_entry(row: ActivityLogRow) -> ActivityLogResult<ActivityLogEntry> {
    let role = UserRole::try_from(row.role.as_str()).map_err(ActivityLogError::persistence)?;
    let action =
        ActivityAction::try_from(row.action.as_str()).map_err(ActivityLogError::persistence)?;
    Ok(ActivityLogEntry::from_persisted(PersistedActivityData {
        id: ActivityLogId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        role,
        action,
        task_id: TaskId::from_uuid(row.task_id),
        project_id: row.project_id.map(ProjectId::from_uuid),
        occurred_at: row.occurred_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{row_to_entry, to_new_row};
    use crate::activity::{
        adapters::postgres::models::ActivityLogRow,
        domain::{ActivityAction, ActivityLogEntry},
    };
    use crate::directory::domain::{ProjectId, UserId, UserRole};
    use crate::task::domain::TaskId;
    use chrono::Utc;
    use mockable::DefaultClock;
    use uuid::Uuid;

    fn row(action: &str) -> ActivityLogRow {
        ActivityLogRow {
            seq: 1,
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: "user".to_owned(),
            action: action.to_owned(),
            task_id: Uuid::new_v4(),
            project_id: None,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn rows_map_to_entries() {
        let entry = row_to_entry(row("STATUS_CHANGED")).expect("row should map");
        assert_eq!(entry.action(), ActivityAction::StatusChanged);
        assert_eq!(entry.role(), UserRole::User);
    }

    #[test]
    fn rows_with_unknown_actions_are_rejected() {
        assert!(row_to_entry(row("ARCHIVED")).is_err());
    }

    #[test]
    fn insert_rows_use_storage_labels() {
        let project = ProjectId::new();
        let entry = ActivityLogEntry::record(
            UserId::new(),
            UserRole::Admin,
            ActivityAction::Created,
            TaskId::new(),
            &DefaultClock,
        )
        .with_project(project);
        let new_row = to_new_row(&entry);
        assert_eq!(new_row.action, "CREATED");
        assert_eq!(new_row.role, "admin");
        assert_eq!(new_row.project_id, Some(project.into_inner()));
    }
}
