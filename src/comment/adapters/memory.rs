//! In-memory comment store for tests and local wiring.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::activity::{adapters::InMemoryActivityLog, domain::ActivityLogEntry};
use crate::comment::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::pagination::{Page, PageRequest};
use crate::task::domain::TaskId;

/// Thread-safe in-memory comment repository.
///
/// Comments are kept in insertion order so equal timestamps list stably.
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
    activity: InMemoryActivityLog,
}

impl InMemoryCommentRepository {
    /// Creates an empty repository appending to `activity`.
    #[must_use]
    pub fn new(activity: InMemoryActivityLog) -> Self {
        Self {
            comments: Arc::default(),
            activity,
        }
    }

    /// Returns the stored record, including tombstoned comments.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn stored(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        Ok(self.read()?.iter().find(|comment| comment.id() == id).cloned())
    }

    fn read(&self) -> CommentRepositoryResult<RwLockReadGuard<'_, Vec<Comment>>> {
        self.comments.read().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> CommentRepositoryResult<RwLockWriteGuard<'_, Vec<Comment>>> {
        self.comments.write().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn replace(
        &self,
        comment: &Comment,
        expected_version: u64,
        entry: Option<&ActivityLogEntry>,
    ) -> CommentRepositoryResult<()> {
        let mut comments = self.write()?;
        let slot = comments
            .iter_mut()
            .find(|stored| stored.id() == comment.id() && !stored.is_removed())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        if slot.version() != expected_version {
            return Err(CommentRepositoryError::ConcurrentModification(comment.id()));
        }
        if let Some(entry) = entry {
            self.activity.lock_for_append()?.push(entry)?;
        }
        *slot = comment.clone();
        Ok(())
    }
}

fn oldest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by_key(Comment::created_at);
    comments
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut comments = self.write()?;
        if comments.iter().any(|stored| stored.id() == comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        comments.push(comment.clone());
        Ok(())
    }

    async fn update(
        &self,
        comment: &Comment,
        expected_version: u64,
    ) -> CommentRepositoryResult<()> {
        self.replace(comment, expected_version, None)
    }

    async fn remove(
        &self,
        comment: &Comment,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> CommentRepositoryResult<()> {
        self.replace(comment, expected_version, Some(entry))
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        Ok(self
            .read()?
            .iter()
            .find(|comment| comment.id() == id && !comment.is_removed())
            .cloned())
    }

    async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> CommentRepositoryResult<Page<Comment>> {
        let matching = self
            .read()?
            .iter()
            .filter(|comment| comment.task_id() == task_id && !comment.is_removed())
            .cloned()
            .collect();
        Ok(Page::from_sorted(oldest_first(matching), page))
    }

    async fn find_children(&self, parent_id: CommentId) -> CommentRepositoryResult<Vec<Comment>> {
        let matching = self
            .read()?
            .iter()
            .filter(|comment| comment.parent_id() == Some(parent_id) && !comment.is_removed())
            .cloned()
            .collect();
        Ok(oldest_first(matching))
    }
}
