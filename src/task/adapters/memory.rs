//! In-memory task store for tests and local wiring.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::activity::{adapters::InMemoryActivityLog, domain::ActivityLogEntry};
use crate::directory::domain::{ProjectId, UserId};
use crate::pagination::Page;
use crate::report::{
    domain::{CreationWindow, StatusTally},
    ports::{BurndownSource, BurndownSourceError, BurndownSourceResult},
};
use crate::task::{
    domain::{SortOrder, Task, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Writes take the task lock and then the audit lock, so a write and its
/// entry become visible together.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    activity: InMemoryActivityLog,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository appending to `activity`.
    #[must_use]
    pub fn new(activity: InMemoryActivityLog) -> Self {
        Self {
            tasks: Arc::default(),
            activity,
        }
    }

    /// Inserts a task as-is without an audit entry.
    ///
    /// Seeds fixtures whose timestamps must be chosen by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the ID exists.
    pub fn seed(&self, task: Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task);
        Ok(())
    }

    /// Returns the stored record, including tombstoned tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn stored(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn replace(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let stored = tasks
            .get(&task.id())
            .filter(|stored| !stored.is_removed())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.version() != expected_version {
            return Err(TaskRepositoryError::ConcurrentModification(task.id()));
        }
        self.activity.lock_for_append()?.push(entry)?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }
}

fn live_sorted<'a>(
    tasks: impl Iterator<Item = &'a Task>,
    order: SortOrder,
    keep: impl Fn(&Task) -> bool,
) -> Vec<Task> {
    let mut matching: Vec<Task> = tasks
        .filter(|task| !task.is_removed() && keep(task))
        .cloned()
        .collect();
    match order {
        SortOrder::Ascending => {
            matching.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        }
        SortOrder::Descending => {
            matching.sort_by_key(|task| Reverse((task.created_at(), task.id().into_inner())));
        }
    }
    matching
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task, entry: &ActivityLogEntry) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        self.activity.lock_for_append()?.push(entry)?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        self.replace(task, expected_version, entry)
    }

    async fn remove(
        &self,
        task: &Task,
        expected_version: u64,
        entry: &ActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        self.replace(task, expected_version, entry)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.read()?;
        Ok(tasks.get(&id).filter(|task| !task.is_removed()).cloned())
    }

    async fn find_by_creator(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(live_sorted(tasks.values(), SortOrder::Descending, |task| {
            task.created_by() == user_id
        }))
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(live_sorted(tasks.values(), SortOrder::Descending, |task| {
            task.assigned_to() == Some(user_id)
        }))
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Page<Task>> {
        let tasks = self.read()?;
        let matching = live_sorted(tasks.values(), query.sort, |task| query.filter.matches(task));
        Ok(Page::from_sorted(matching, query.page))
    }
}

#[async_trait]
impl BurndownSource for InMemoryTaskRepository {
    async fn tally_created_by_status(
        &self,
        project_id: ProjectId,
        windows: &[CreationWindow],
    ) -> BurndownSourceResult<Vec<StatusTally>> {
        let tasks = self.tasks.read().map_err(|err| {
            BurndownSourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tallies = vec![StatusTally::default(); windows.len()];
        for task in tasks
            .values()
            .filter(|task| !task.is_removed() && task.project_id() == project_id)
        {
            let bucket = windows
                .iter()
                .position(|window| window.contains(task.created_at()))
                .and_then(|index| tallies.get_mut(index));
            if let Some(tally) = bucket {
                tally.record(task.status());
            }
        }
        Ok(tallies)
    }
}
