//! Adapter implementations for the audit trail.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryActivityLog;
pub use postgres::PostgresActivityLog;
