//! In-memory audit trail shared with the in-memory task and comment stores.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::activity::{
    domain::ActivityLogEntry,
    ports::{ActivityLogError, ActivityLogRepository, ActivityLogResult},
};
use crate::task::domain::TaskId;

/// Thread-safe append-only entry list.
///
/// Clones share storage, so a task store built from a clone appends to the
/// same trail that [`ActivityLogRepository::list_all`] reads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityLogEntry>>>,
}

/// Exclusive append handle held while a writer commits its own change.
pub(crate) struct AppendGuard<'a> {
    entries: RwLockWriteGuard<'a, Vec<ActivityLogEntry>>,
}

impl AppendGuard<'_> {
    /// Appends one entry, rejecting a reused identifier.
    pub(crate) fn push(&mut self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        if self.entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(ActivityLogError::DuplicateEntry(entry.id()));
        }
        self.entries.push(entry.clone());
        Ok(())
    }
}

impl InMemoryActivityLog {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the trail for appending.
    pub(crate) fn lock_for_append(&self) -> ActivityLogResult<AppendGuard<'_>> {
        let entries = self
            .entries
            .write()
            .map_err(|err| ActivityLogError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(AppendGuard { entries })
    }

    fn read(&self) -> ActivityLogResult<RwLockReadGuard<'_, Vec<ActivityLogEntry>>> {
        self.entries
            .read()
            .map_err(|err| ActivityLogError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        self.lock_for_append()?.push(entry)
    }

    async fn list_all(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        Ok(self.read()?.clone())
    }

    async fn list_by_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.read()?;
        let mut matching: Vec<(usize, &ActivityLogEntry)> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.task_id() == task_id)
            .collect();
        matching.sort_by(|(left_seq, left), (right_seq, right)| {
            right
                .occurred_at()
                .cmp(&left.occurred_at())
                .then(right_seq.cmp(left_seq))
        });
        Ok(matching.into_iter().map(|(_, entry)| entry.clone()).collect())
    }
}
