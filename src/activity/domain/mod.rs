//! Domain model for audit entries.

mod entry;
mod error;

pub use entry::{ActivityAction, ActivityLogEntry, ActivityLogId, PersistedActivityData};
pub use error::ParseActivityActionError;
