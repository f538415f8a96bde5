//! Adapter implementations for task persistence.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
