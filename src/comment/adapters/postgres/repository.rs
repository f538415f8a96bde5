//! `PostgreSQL` repository implementation for comments.

use super::{models::CommentRow, schema::comments};
use crate::activity::{adapters::postgres::insert_entry, domain::ActivityLogEntry};
use crate::comment::{
    domain::{Comment, CommentContent, CommentId, PersistedCommentData},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::db::PgPool;
use crate::directory::domain::UserId;
use crate::pagination::{Page, PageRequest};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }

    async fn write_versioned(
        &self,
        comment: &Comment,
        expected_version: u64,
        entry: Option<&ActivityLogEntry>,
    ) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment)?;
        let expected = i64::try_from(expected_version).map_err(CommentRepositoryError::persistence)?;
        let entry = entry.cloned();

        self.run_blocking(move |connection| {
            connection.transaction::<_, CommentRepositoryError, _>(|tx| {
                let updated = diesel::update(
                    comments::table
                        .filter(comments::id.eq(comment_id.into_inner()))
                        .filter(comments::version.eq(expected))
                        .filter(comments::deleted_at.is_null()),
                )
                .set(&row)
                .execute(tx)?;

                if updated == 0 {
                    let live = comments::table
                        .filter(comments::id.eq(comment_id.into_inner()))
                        .filter(comments::deleted_at.is_null())
                        .count()
                        .get_result::<i64>(tx)?;
                    return Err(if live == 0 {
                        CommentRepositoryError::NotFound(comment_id)
                    } else {
                        CommentRepositoryError::ConcurrentModification(comment_id)
                    });
                }

                if let Some(entry) = &entry {
                    insert_entry(tx, entry)?;
                }
                Ok(())
            })
        })
        .await
    }
}

impl From<DieselError> for CommentRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => CommentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        comment: &Comment,
        expected_version: u64,
    ) -> CommentRepositoryResult<()> {
        self.write_versioned(comment, expected_version, None).await
    }

    async fn remove(
        &self,
        comment: &Comment,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> CommentRepositoryResult<()> {
        self.write_versioned(comment, expected_version, Some(entry))
            .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()?;
            row.map(row_to_comment).transpose()
        })
        .await
    }

    async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> CommentRepositoryResult<Page<Comment>> {
        self.run_blocking(move |connection| {
            let total = live_on_task(task_id)
                .count()
                .get_result::<i64>(connection)?;
            let offset =
                i64::try_from(page.offset()).map_err(CommentRepositoryError::persistence)?;
            let items = live_on_task(task_id)
                .order((comments::created_at.asc(), comments::id.asc()))
                .offset(offset)
                .limit(i64::from(page.limit()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)?
                .into_iter()
                .map(row_to_comment)
                .collect::<CommentRepositoryResult<Vec<_>>>()?;
            Ok(Page {
                items,
                total: u64::try_from(total).map_err(CommentRepositoryError::persistence)?,
                page: page.page(),
                limit: page.limit(),
            })
        })
        .await
    }

    async fn find_children(&self, parent_id: CommentId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            comments::table
                .filter(comments::parent_id.eq(parent_id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .order((comments::created_at.asc(), comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)?
                .into_iter()
                .map(row_to_comment)
                .collect()
        })
        .await
    }
}

fn live_on_task(task_id: TaskId) -> comments::BoxedQuery<'static, Pg> {
    comments::table
        .filter(comments::task_id.eq(task_id.into_inner()))
        .filter(comments::deleted_at.is_null())
        .into_boxed()
}

fn to_row(comment: &Comment) -> CommentRepositoryResult<CommentRow> {
    Ok(CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        author_id: comment.author_id().map(UserId::into_inner),
        content: comment.content().as_str().to_owned(),
        parent_id: comment.parent_id().map(CommentId::into_inner),
        is_edited: comment.is_edited(),
        version: i64::try_from(comment.version()).map_err(CommentRepositoryError::persistence)?,
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
        deleted_at: comment.deleted_at(),
    })
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author_id: row.author_id.map(UserId::from_uuid),
        content: CommentContent::new(row.content).map_err(CommentRepositoryError::persistence)?,
        parent_id: row.parent_id.map(CommentId::from_uuid),
        is_edited: row.is_edited,
        version: u64::try_from(row.version).map_err(CommentRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }))
}
