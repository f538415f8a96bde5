//! Port contracts for the audit trail.

pub mod repository;

pub use repository::{ActivityLogError, ActivityLogRepository, ActivityLogResult};
