//! Adapter implementations for directory lookups.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDirectory;
pub use postgres::PostgresDirectory;
