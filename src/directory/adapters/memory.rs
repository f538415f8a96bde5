//! In-memory user and project directory for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{Project, ProjectId, User, UserId},
    ports::{DirectoryError, DirectoryResult, ProjectDirectory, UserDirectory},
};

/// Thread-safe in-memory directory implementing both lookup ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    // Registration order decides which user wins a shared name.
    users: Vec<User>,
    projects: HashMap<ProjectId, Project>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, replacing any user with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert_user(&self, user: User) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state.users.retain(|existing| existing.id() != user.id());
        state.users.push(user);
        Ok(())
    }

    /// Removes a user so later lookups no longer resolve it.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn remove_user(&self, id: UserId) -> DirectoryResult<()> {
        self.write()?.users.retain(|user| user.id() != id);
        Ok(())
    }

    /// Registers a project, replacing any project with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert_project(&self, project: Project) -> DirectoryResult<()> {
        self.write()?.projects.insert(project.id(), project);
        Ok(())
    }

    fn read(&self) -> DirectoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> DirectoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.iter().find(|user| user.name() == name).cloned())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }
}
