//! Shared world state for task status audit BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrail::activity::adapters::InMemoryActivityLog;
use tasktrail::directory::{adapters::InMemoryDirectory, domain::Project};
use tasktrail::task::{
    adapters::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, InMemoryDirectory, DefaultClock>;

/// Scenario world for task status audit behaviour tests.
pub struct TaskAuditWorld {
    pub service: TestTaskService,
    pub activity: InMemoryActivityLog,
    pub directory: InMemoryDirectory,
    pub project: Option<Project>,
    pub last_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskAuditWorld {
    /// Creates a world with an empty directory and log.
    #[must_use]
    pub fn new() -> Self {
        let activity = InMemoryActivityLog::new();
        let directory = InMemoryDirectory::new();
        let directory_arc = Arc::new(directory.clone());
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new(activity.clone())),
            Arc::clone(&directory_arc),
            directory_arc,
            Arc::new(DefaultClock),
        );

        Self {
            service,
            activity,
            directory,
            project: None,
            last_task: None,
            last_result: None,
        }
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskAuditWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAuditWorld {
    TaskAuditWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
