//! Append-only repository port for audit entries.

use crate::activity::domain::{ActivityLogEntry, ActivityLogId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Audit persistence contract.
///
/// There is deliberately no update or delete operation.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::DuplicateEntry`] when the identifier was
    /// already appended.
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()>;

    /// Returns every entry in append order.
    async fn list_all(&self) -> ActivityLogResult<Vec<ActivityLogEntry>>;

    /// Returns the entries for one task, most recent first.
    ///
    /// Entries sharing a timestamp are returned latest-appended first.
    async fn list_by_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// An entry with the same identifier already exists.
    #[error("duplicate activity entry: {0}")]
    DuplicateEntry(ActivityLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
