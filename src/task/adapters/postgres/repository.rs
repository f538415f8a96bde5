//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskRecord, TaskRow},
    schema::tasks,
};
use crate::activity::{adapters::postgres::insert_entry, domain::ActivityLogEntry};
use crate::db::PgPool;
use crate::directory::domain::{ProjectId, UserId};
use crate::pagination::Page;
use crate::report::{
    domain::{CreationWindow, StatusTally},
    ports::{BurndownSource, BurndownSourceError, BurndownSourceResult},
};
use crate::task::{
    domain::{
        PersistedTaskData, SortOrder, Task, TaskFilter, TaskId, TaskPriority, TaskQuery,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::error::Error as StdError;
use std::sync::Arc;

/// `PostgreSQL`-backed task repository and burndown source.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

type PersistenceWrap<E> = fn(Arc<dyn StdError + Send + Sync>) -> E;

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking_with<F, T, E>(&self, f: F, wrap: PersistenceWrap<E>) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(|err| wrap(Arc::new(err)))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| wrap(Arc::new(err)))?
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking_with(f, TaskRepositoryError::Persistence)
            .await
    }

    async fn write_versioned(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;
        let expected = to_db_version(expected_version)?;
        let entry = entry.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(task_id.into_inner()))
                        .filter(tasks::version.eq(expected))
                        .filter(tasks::deleted_at.is_null()),
                )
                .set(&record)
                .execute(tx)?;

                if updated == 0 {
                    let live = tasks::table
                        .filter(tasks::id.eq(task_id.into_inner()))
                        .filter(tasks::deleted_at.is_null())
                        .count()
                        .get_result::<i64>(tx)?;
                    return Err(if live == 0 {
                        TaskRepositoryError::NotFound(task_id)
                    } else {
                        TaskRepositoryError::ConcurrentModification(task_id)
                    });
                }

                insert_entry(tx, &entry)?;
                Ok(())
            })
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task, entry: &ActivityLogEntry) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;
        let entry = entry.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&record)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                insert_entry(tx, &entry)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        self.write_versioned(task, expected_version, entry).await
    }

    async fn remove(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        self.write_versioned(task, expected_version, entry).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_creator(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::created_by.eq(user_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::assigned_to.eq(user_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Page<Task>> {
        let query = query.clone();
        self.run_blocking(move |connection| {
            let total = filtered(&query.filter)
                .count()
                .get_result::<i64>(connection)?;
            let offset =
                i64::try_from(query.page.offset()).map_err(TaskRepositoryError::persistence)?;
            let ordered = match query.sort {
                SortOrder::Ascending => filtered(&query.filter)
                    .order((tasks::created_at.asc(), tasks::id.asc())),
                SortOrder::Descending => filtered(&query.filter)
                    .order((tasks::created_at.desc(), tasks::id.desc())),
            };
            let items = ordered
                .offset(offset)
                .limit(i64::from(query.page.limit()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            Ok(Page {
                items,
                total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
                page: query.page.page(),
                limit: query.page.limit(),
            })
        })
        .await
    }
}

#[async_trait]
impl BurndownSource for PostgresTaskRepository {
    async fn tally_created_by_status(
        &self,
        project_id: ProjectId,
        windows: &[CreationWindow],
    ) -> BurndownSourceResult<Vec<StatusTally>> {
        let windows = windows.to_vec();
        self.run_blocking_with(
            move |connection| {
                connection
                    .build_transaction()
                    .repeatable_read()
                    .read_only()
                    .run::<_, DieselError, _>(|tx| {
                        windows
                            .iter()
                            .map(|window| count_window(tx, project_id, window))
                            .collect::<QueryResult<Vec<_>>>()
                    })
                    .map_err(BurndownSourceError::persistence)?
                    .into_iter()
                    .map(tally_rows)
                    .collect()
            },
            BurndownSourceError::Persistence,
        )
        .await
    }
}

fn count_window(
    connection: &mut PgConnection,
    project_id: ProjectId,
    window: &CreationWindow,
) -> QueryResult<Vec<(String, i64)>> {
    tasks::table
        .filter(tasks::project_id.eq(project_id.into_inner()))
        .filter(tasks::deleted_at.is_null())
        .filter(tasks::created_at.ge(window.start()))
        .filter(tasks::created_at.lt(window.end()))
        .group_by(tasks::status)
        .select((tasks::status, count_star()))
        .load::<(String, i64)>(connection)
}

fn tally_rows(rows: Vec<(String, i64)>) -> BurndownSourceResult<StatusTally> {
    let mut tally = StatusTally::default();
    for (label, count) in rows {
        let status =
            TaskStatus::try_from(label.as_str()).map_err(BurndownSourceError::persistence)?;
        let count = u64::try_from(count).map_err(BurndownSourceError::persistence)?;
        tally.add(status, count);
    }
    Ok(tally)
}

fn filtered(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table.filter(tasks::deleted_at.is_null()).into_boxed();
    if let Some(needle) = &filter.title_contains {
        query = query.filter(tasks::title.ilike(format!("%{}%", escape_like(needle))));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(project_id) = filter.project_id {
        query = query.filter(tasks::project_id.eq(project_id.into_inner()));
    }
    query
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_db_version(version: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(version).map_err(TaskRepositoryError::persistence)
}

fn to_record(task: &Task) -> TaskRepositoryResult<TaskRecord> {
    Ok(TaskRecord {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        created_by: task.created_by().into_inner(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        project_id: task.project_id().into_inner(),
        version: to_db_version(task.version())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        priority,
        due_date,
        created_by,
        assigned_to,
        project_id,
        version,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        due_date,
        created_by: UserId::from_uuid(created_by),
        assigned_to: assigned_to.map(UserId::from_uuid),
        project_id: ProjectId::from_uuid(project_id),
        version: u64::try_from(version).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
        deleted_at,
    };
    Ok(Task::from_persisted(data))
}

#[cfg(test)]
mod tests {
    use super::{escape_like, row_to_task, tally_rows, to_record};
    use crate::task::{adapters::postgres::models::TaskRow, domain::TaskStatus};
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(status: &str) -> TaskRow {
        let now = Utc::now();
        TaskRow {
            id: Uuid::new_v4(),
            title: "Write release notes".to_owned(),
            description: String::new(),
            status: status.to_owned(),
            priority: "high".to_owned(),
            due_date: now,
            created_by: Uuid::new_v4(),
            assigned_to: None,
            project_id: Uuid::new_v4(),
            version: 3,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn rows_round_trip_through_records() {
        let task = row_to_task(row("in_progress")).expect("row should map");
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.version(), 3);

        let record = to_record(&task).expect("record should build");
        assert_eq!(record.status, "in_progress");
        assert_eq!(record.version, 3);
    }

    #[test]
    fn rows_with_unknown_status_are_rejected() {
        assert!(row_to_task(row("archived")).is_err());
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%", "50\\%")]
    #[case("snake_case", "snake\\_case")]
    fn like_patterns_are_escaped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }

    #[test]
    fn grouped_counts_skip_closed_tasks() {
        let tally = tally_rows(vec![
            ("completed".to_owned(), 2),
            ("not_started".to_owned(), 1),
            ("closed".to_owned(), 4),
        ])
        .expect("labels should parse");
        assert_eq!(
            (tally.completed, tally.in_progress, tally.not_started),
            (2, 0, 1)
        );
    }
}
