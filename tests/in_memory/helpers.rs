//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrail::activity::{adapters::InMemoryActivityLog, services::ActivityLogService};
use tasktrail::comment::{adapters::InMemoryCommentRepository, services::CommentService};
use tasktrail::directory::{
    adapters::InMemoryDirectory,
    domain::{Project, User, UserRole},
};
use tasktrail::report::services::BurndownService;
use tasktrail::task::{adapters::InMemoryTaskRepository, services::TaskLifecycleService};

/// Task service wired to in-memory adapters.
pub type Tasks =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, InMemoryDirectory, DefaultClock>;

/// Comment service wired to in-memory adapters.
pub type Comments = CommentService<
    InMemoryCommentRepository,
    InMemoryTaskRepository,
    InMemoryDirectory,
    DefaultClock,
>;

/// Every service sharing one directory and one activity log.
pub struct Workspace {
    pub tasks: Tasks,
    pub comments: Comments,
    pub activity: ActivityLogService<InMemoryActivityLog, DefaultClock>,
    pub burndown: BurndownService<InMemoryTaskRepository>,
    pub task_store: InMemoryTaskRepository,
    pub comment_store: InMemoryCommentRepository,
    pub directory: InMemoryDirectory,
    pub admin: User,
    pub member: User,
    pub project: Project,
}

/// Provides a fresh workspace with an admin, a member, and one project.
///
/// # Panics
///
/// Panics if the directory cannot be seeded.
#[fixture]
pub fn workspace() -> Workspace {
    let log = InMemoryActivityLog::new();
    let task_store = InMemoryTaskRepository::new(log.clone());
    let comment_store = InMemoryCommentRepository::new(log.clone());
    let directory = InMemoryDirectory::new();

    let admin = User::new("selin", "selin@example.com", UserRole::Admin);
    let member = User::new("emre", "emre@example.com", UserRole::User);
    directory.insert_user(admin.clone()).expect("insert admin");
    directory.insert_user(member.clone()).expect("insert member");
    let project = Project::new("Mobile", "Offline mode", admin.id());
    directory
        .insert_project(project.clone())
        .expect("insert project");

    let clock = Arc::new(DefaultClock);
    let directory_arc = Arc::new(directory.clone());
    let task_arc = Arc::new(task_store.clone());
    Workspace {
        tasks: TaskLifecycleService::new(
            Arc::clone(&task_arc),
            Arc::clone(&directory_arc),
            Arc::clone(&directory_arc),
            Arc::clone(&clock),
        ),
        comments: CommentService::new(
            Arc::new(comment_store.clone()),
            Arc::clone(&task_arc),
            directory_arc,
            Arc::clone(&clock),
        ),
        activity: ActivityLogService::new(Arc::new(log), clock),
        burndown: BurndownService::new(task_arc),
        task_store,
        comment_store,
        directory,
        admin,
        member,
        project,
    }
}
