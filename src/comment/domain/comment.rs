//! Comment entity.

use super::{CommentContent, CommentId};
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment on a task, optionally replying to another comment.
///
/// The parent is a back-reference; replies are found by querying for
/// comments whose parent is this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: Option<UserId>,
    content: CommentContent,
    parent_id: Option<CommentId>,
    is_edited: bool,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Owning task.
    pub task_id: TaskId,
    /// Author, `None` for anonymous comments.
    pub author_id: Option<UserId>,
    /// Content.
    pub content: CommentContent,
    /// Parent comment.
    pub parent_id: Option<CommentId>,
    /// Whether the content was ever changed.
    pub is_edited: bool,
    /// Optimistic-concurrency version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Creates a new, unedited comment at version 1.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author_id: Option<UserId>,
        content: CommentContent,
        parent_id: Option<CommentId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: CommentId::new(),
            task_id,
            author_id,
            content,
            parent_id,
            is_edited: false,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            content: data.content,
            parent_id: data.parent_id,
            is_edited: data.is_edited,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author, `None` for anonymous comments.
    #[must_use]
    pub const fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    /// Returns the content.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns the parent comment, if this is a reply.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Returns `true` once the content has been changed.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.is_edited
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete timestamp.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` once the comment has been removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns `true` when `actor` wrote this comment.
    ///
    /// Anonymous comments have no owner.
    #[must_use]
    pub fn is_authored_by(&self, actor: Option<UserId>) -> bool {
        self.author_id.is_some() && self.author_id == actor
    }

    /// Replaces the content when it differs and reports whether it did.
    pub fn revise(&mut self, content: CommentContent, clock: &impl Clock) -> bool {
        if content == self.content {
            return false;
        }
        self.content = content;
        self.is_edited = true;
        self.touch(clock);
        true
    }

    /// Tombstones the comment.
    pub fn mark_removed(&mut self, clock: &impl Clock) {
        self.touch(clock);
        self.deleted_at = Some(self.updated_at);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}
