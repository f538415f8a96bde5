//! `PostgreSQL` adapters for task persistence and burndown counting.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskRepository;
