//! Comment thread service: posting, listing, editing, and removal.

use super::{CreateCommentRequest, UpdateCommentRequest};
use crate::activity::domain::{ActivityAction, ActivityLogEntry};
use crate::comment::{
    domain::{Comment, CommentContent, CommentDomainError, CommentId},
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::directory::{
    domain::{User, UserId, UserRole},
    ports::{DirectoryError, UserDirectory},
};
use crate::error::ErrorKind;
use crate::pagination::{Page, PageRequest};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// The task does not exist or was removed.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The comment does not exist or was removed.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),
    /// The reply target does not exist or was removed.
    #[error("parent comment not found: {0}")]
    ParentNotFound(CommentId),
    /// The reply target belongs to another task.
    #[error("parent comment {parent} belongs to another task than {task}")]
    ParentOnOtherTask {
        /// Reply target.
        parent: CommentId,
        /// Task the reply was posted on.
        task: TaskId,
    },
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// The update carried nothing to change.
    #[error("no changes provided")]
    NoChanges,
    /// The actor is not the author of the comment.
    #[error("only the author may modify comment {0}")]
    Forbidden(CommentId),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
}

impl CommentServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::CommentNotFound(_)
            | Self::Repository(CommentRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::ParentNotFound(_)
            | Self::ParentOnOtherTask { .. }
            | Self::Domain(_)
            | Self::NoChanges => ErrorKind::BadRequest,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Repository(
                CommentRepositoryError::ConcurrentModification(_)
                | CommentRepositoryError::DuplicateComment(_),
            ) => ErrorKind::Conflict,
            Self::Directory(_)
            | Self::Tasks(_)
            | Self::Repository(
                CommentRepositoryError::AuditAppend(_) | CommentRepositoryError::Persistence(_),
            ) => ErrorKind::Storage,
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// A comment with its resolved author and live parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// The comment itself.
    pub comment: Comment,
    /// Resolved author; `None` when anonymous or no longer known.
    pub author: Option<User>,
    /// Parent comment, when it is still live.
    pub parent: Option<Comment>,
}

/// Confirmation returned by a successful removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentDeletion {
    /// Removed comment.
    pub comment_id: CommentId,
}

impl CommentDeletion {
    /// Human-readable confirmation.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Comment {} deleted", self.comment_id)
    }
}

/// Comment orchestration service.
#[derive(Clone)]
pub struct CommentService<M, T, U, C>
where
    M: CommentRepository,
    T: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    comments: Arc<M>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<M, T, U, C> CommentService<M, T, U, C>
where
    M: CommentRepository,
    T: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(comments: Arc<M>, tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            comments,
            tasks,
            users,
            clock,
        }
    }

    /// Posts a comment, optionally as a reply.
    ///
    /// An author identifier that no longer resolves yields an anonymous
    /// comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`],
    /// [`CommentServiceError::ParentNotFound`],
    /// [`CommentServiceError::ParentOnOtherTask`], or
    /// [`CommentServiceError::Domain`] for blank content, in that order.
    pub async fn create(&self, request: CreateCommentRequest) -> CommentServiceResult<Comment> {
        let CreateCommentRequest {
            task_id,
            content,
            author_id,
            parent_id,
        } = request;

        if self.tasks.find_by_id(task_id).await?.is_none() {
            return Err(CommentServiceError::TaskNotFound(task_id));
        }
        if let Some(parent_id) = parent_id {
            let parent = self
                .comments
                .find_by_id(parent_id)
                .await?
                .ok_or(CommentServiceError::ParentNotFound(parent_id))?;
            if parent.task_id() != task_id {
                return Err(CommentServiceError::ParentOnOtherTask {
                    parent: parent_id,
                    task: task_id,
                });
            }
        }
        let author = match author_id {
            Some(id) => self.resolve_author(id).await?,
            None => None,
        };
        let content = CommentContent::new(content)?;

        let comment = Comment::new(task_id, author, content, parent_id, &*self.clock);
        self.comments.store(&comment).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %task_id,
            reply = parent_id.is_some(),
            "posted comment"
        );
        Ok(comment)
    }

    /// Lists a task's live comments oldest first, with authors and parents.
    ///
    /// Page and limit values below one are raised to one.
    ///
    /// # Errors
    ///
    /// Returns repository or directory failures.
    pub async fn list_by_task(
        &self,
        task_id: TaskId,
        page: u32,
        limit: u32,
    ) -> CommentServiceResult<Page<CommentView>> {
        let request = PageRequest::at_least_one(page, limit);
        let comments = self.comments.list_by_task(task_id, request).await?;

        let mut context = Vec::with_capacity(comments.items.len());
        for comment in &comments.items {
            let author = match comment.author_id() {
                Some(id) => self.users.find_by_id(id).await?,
                None => None,
            };
            let parent = match comment.parent_id() {
                Some(id) => self.comments.find_by_id(id).await?,
                None => None,
            };
            context.push((author, parent));
        }
        debug!(task_id = %task_id, count = context.len(), "listed comments");

        let mut context = context.into_iter();
        Ok(comments.map(|comment| {
            let (author, parent) = context.next().unwrap_or_default();
            CommentView {
                comment,
                author,
                parent,
            }
        }))
    }

    /// Lists the live direct replies to a comment, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::CommentNotFound`] when the comment is
    /// missing or removed.
    pub async fn list_replies(&self, comment_id: CommentId) -> CommentServiceResult<Vec<Comment>> {
        self.require_comment(comment_id).await?;
        Ok(self.comments.find_children(comment_id).await?)
    }

    /// Edits a comment's content on behalf of its author.
    ///
    /// Identical content is accepted and leaves the comment untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::CommentNotFound`],
    /// [`CommentServiceError::Forbidden`],
    /// [`CommentServiceError::NoChanges`], or
    /// [`CommentServiceError::Domain`] in that order.
    pub async fn update(&self, request: UpdateCommentRequest) -> CommentServiceResult<Comment> {
        let UpdateCommentRequest {
            comment_id,
            actor_id,
            content,
        } = request;

        let mut comment = self.require_comment(comment_id).await?;
        if !comment.is_authored_by(actor_id) {
            return Err(CommentServiceError::Forbidden(comment_id));
        }
        let content = CommentContent::new(content.ok_or(CommentServiceError::NoChanges)?)?;

        let expected_version = comment.version();
        if comment.revise(content, &*self.clock) {
            self.comments.update(&comment, expected_version).await?;
            info!(comment_id = %comment_id, "edited comment");
        } else {
            debug!(comment_id = %comment_id, "comment content unchanged");
        }
        Ok(comment)
    }

    /// Tombstones a comment and records `COMMENT_DELETED`.
    ///
    /// Replies are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::CommentNotFound`] or
    /// [`CommentServiceError::Forbidden`].
    pub async fn remove(
        &self,
        comment_id: CommentId,
        actor_id: UserId,
        actor_role: UserRole,
    ) -> CommentServiceResult<CommentDeletion> {
        let mut comment = self.require_comment(comment_id).await?;
        if !comment.is_authored_by(Some(actor_id)) {
            return Err(CommentServiceError::Forbidden(comment_id));
        }

        let expected_version = comment.version();
        comment.mark_removed(&*self.clock);
        let entry = ActivityLogEntry::record(
            actor_id,
            actor_role,
            ActivityAction::CommentDeleted,
            comment.task_id(),
            &*self.clock,
        );
        self.comments
            .remove(&comment, expected_version, &entry)
            .await?;
        info!(comment_id = %comment_id, task_id = %comment.task_id(), "removed comment");
        Ok(CommentDeletion { comment_id })
    }

    async fn require_comment(&self, comment_id: CommentId) -> CommentServiceResult<Comment> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or(CommentServiceError::CommentNotFound(comment_id))
    }

    async fn resolve_author(&self, author_id: UserId) -> CommentServiceResult<Option<UserId>> {
        let author = self.users.find_by_id(author_id).await?;
        if author.is_none() {
            warn!(author_id = %author_id, "comment author not found, posting anonymously");
        }
        Ok(author.map(|user| user.id()))
    }
}
