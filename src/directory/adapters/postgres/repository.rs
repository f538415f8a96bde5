//! `PostgreSQL` directory lookups.

use super::{
    models::{ProjectRow, UserRow},
    schema::{projects, users},
};
use crate::db::PgPool;
use crate::directory::{
    domain::{Project, ProjectId, User, UserId, UserRole},
    ports::{DirectoryError, DirectoryResult, ProjectDirectory, UserDirectory},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed directory implementing both lookup ports.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresDirectory {
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<User>> {
        let lookup_name = name.to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::name.eq(lookup_name))
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

#[async_trait]
impl ProjectDirectory for PostgresDirectory {
    async fn find_by_id(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            Ok(row.map(row_to_project))
        })
        .await
    }
}

pub(super) fn row_to_user(row: UserRow) -> DirectoryResult<User> {
    let role = UserRole::try_from(row.role.as_str()).map_err(DirectoryError::persistence)?;
    Ok(User::from_parts(
        UserId::from_uuid(row.id),
        row.name,
        row.email,
        role,
    ))
}

pub(super) fn row_to_project(row: ProjectRow) -> Project {
    Project::from_parts(
        ProjectId::from_uuid(row.id),
        row.name,
        row.description,
        UserId::from_uuid(row.owner_id),
    )
}
