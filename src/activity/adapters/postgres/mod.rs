//! `PostgreSQL` adapter for the audit trail.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub(crate) use repository::insert_entry;
pub use repository::PostgresActivityLog;
