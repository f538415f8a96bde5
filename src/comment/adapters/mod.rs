//! Adapter implementations for comment persistence.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCommentRepository;
pub use postgres::PostgresCommentRepository;
