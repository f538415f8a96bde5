//! Repository port for comment persistence and thread lookup.

use crate::activity::{domain::ActivityLogEntry, ports::ActivityLogError};
use crate::comment::domain::{Comment, CommentId};
use crate::pagination::{Page, PageRequest};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::DuplicateComment`] when the ID
    /// already exists.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Replaces a live comment whose stored version equals
    /// `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] or
    /// [`CommentRepositoryError::ConcurrentModification`].
    async fn update(&self, comment: &Comment, expected_version: u64)
    -> CommentRepositoryResult<()>;

    /// Persists the tombstoned comment and appends the entry atomically.
    ///
    /// # Errors
    ///
    /// Same as [`CommentRepository::update`], plus
    /// [`CommentRepositoryError::AuditAppend`] when the entry is rejected.
    async fn remove(
        &self,
        comment: &Comment,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> CommentRepositoryResult<()>;

    /// Finds a live comment.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Returns one page of a task's live comments, oldest first.
    async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> CommentRepositoryResult<Page<Comment>>;

    /// Returns the live replies to a comment, oldest first.
    async fn find_children(&self, parent_id: CommentId) -> CommentRepositoryResult<Vec<Comment>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The comment was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// The stored version no longer matches the version that was read.
    #[error("comment {0} was modified concurrently")]
    ConcurrentModification(CommentId),

    /// The audit entry could not be appended.
    #[error("audit append failed: {0}")]
    AuditAppend(#[from] ActivityLogError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
