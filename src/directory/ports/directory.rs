//! Lookup contracts for the external user and project directories.

use crate::directory::domain::{Project, ProjectId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Resolves users by identifier or display name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when no such user exists.
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>>;

    /// Finds a user by exact display name.
    ///
    /// When several users share a name the first registered one wins.
    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<User>>;
}

/// Resolves projects by identifier.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when no such project exists.
    async fn find_by_id(&self, id: ProjectId) -> DirectoryResult<Option<Project>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Persistence-layer failure.
    #[error("directory lookup failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
