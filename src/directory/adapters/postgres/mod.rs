//! `PostgreSQL` adapters for directory lookups.

mod models;
mod repository;
mod schema;

pub use repository::PostgresDirectory;
