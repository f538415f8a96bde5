//! `PostgreSQL` connection pooling and schema bootstrap.

use crate::config::DatabaseConfig;
use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool shared by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const CREATE_CORE_TABLES_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_core_tables/up.sql");

const ADD_ACTIVITY_LOG_GUARD_SQL: &str =
    include_str!("../migrations/2026-10-01-000001_add_activity_log_guard/up.sql");

/// Builds an r2d2 pool for the configured database.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn connection_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    Pool::builder()
        .max_size(config.max_connections.max(1))
        .build(manager)
}

/// Applies every migration in order.
///
/// # Errors
///
/// Returns the database error raised by the first failing statement.
pub fn apply_schema(conn: &mut PgConnection) -> diesel::QueryResult<()> {
    conn.batch_execute(CREATE_CORE_TABLES_SQL)?;
    conn.batch_execute(ADD_ACTIVITY_LOG_GUARD_SQL)
}
