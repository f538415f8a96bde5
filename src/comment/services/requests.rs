//! Request payloads for comment operations.

use crate::comment::domain::CommentId;
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;

/// Request to post a comment on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub(super) task_id: TaskId,
    pub(super) content: String,
    pub(super) author_id: Option<UserId>,
    pub(super) parent_id: Option<CommentId>,
}

impl CreateCommentRequest {
    /// Creates an anonymous, top-level comment request.
    #[must_use]
    pub fn new(task_id: TaskId, content: impl Into<String>) -> Self {
        Self {
            task_id,
            content: content.into(),
            author_id: None,
            parent_id: None,
        }
    }

    /// Attributes the comment to a user.
    #[must_use]
    pub const fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Posts the comment as a reply.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Request to edit a comment's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    pub(super) comment_id: CommentId,
    pub(super) actor_id: Option<UserId>,
    pub(super) content: Option<String>,
}

impl UpdateCommentRequest {
    /// Creates an update request carrying no changes.
    #[must_use]
    pub const fn new(comment_id: CommentId) -> Self {
        Self {
            comment_id,
            actor_id: None,
            content: None,
        }
    }

    /// Sets the acting user.
    #[must_use]
    pub const fn with_actor(mut self, actor_id: UserId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Sets the replacement content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
