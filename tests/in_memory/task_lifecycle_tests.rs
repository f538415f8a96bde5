//! Task lifecycle integration tests against in-memory adapters.

use super::helpers::{Workspace, workspace};
use chrono::{Duration, Utc};
use rstest::rstest;
use mockable::DefaultClock;
use tasktrail::activity::domain::{ActivityAction, ActivityLogEntry};
use tasktrail::directory::domain::UserRole;
use tasktrail::error::ErrorKind;
use tasktrail::pagination::PageRequest;
use tasktrail::task::{
    domain::{SortOrder, TaskFilter, TaskPriority, TaskQuery, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, UpdateTaskRequest, UpdateTaskStatusRequest},
};

fn draft(workspace: &Workspace, title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(
        title,
        "",
        Utc::now() + Duration::days(7),
        workspace.admin.name(),
        workspace.project.id(),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_write_appends_exactly_one_entry(workspace: Workspace) {
    let task = workspace
        .tasks
        .create(draft(&workspace, "Sync engine"))
        .await
        .expect("create");
    workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(task.id(), "in_progress"))
        .await
        .expect("start");
    workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(task.id(), "completed"))
        .await
        .expect("complete");
    workspace
        .tasks
        .update(UpdateTaskRequest::new(task.id()).with_priority(TaskPriority::High))
        .await
        .expect("update");
    workspace.tasks.remove(task.id()).await.expect("remove");

    let actions: Vec<_> = workspace
        .activity
        .list_all()
        .await
        .expect("list")
        .iter()
        .map(|entry| entry.action())
        .collect();
    assert_eq!(
        actions,
        [
            ActivityAction::Created,
            ActivityAction::InProgress,
            ActivityAction::StatusChanged,
            ActivityAction::Update,
            ActivityAction::Deleted,
        ]
    );

    let history = workspace
        .activity
        .list_by_task(task.id())
        .await
        .expect("history");
    assert_eq!(history.len(), 5);
    assert!(history.iter().all(|entry| entry.role() == UserRole::Admin));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_tasks_disappear_from_reads(workspace: Workspace) {
    let task = workspace
        .tasks
        .create(draft(&workspace, "Obsolete"))
        .await
        .expect("create");
    workspace.tasks.remove(task.id()).await.expect("remove");

    assert!(workspace
        .tasks
        .find_by_id(task.id())
        .await
        .expect("find")
        .is_none());
    let err = workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(task.id(), "completed"))
        .await
        .expect_err("removed task");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let stored = workspace
        .task_store
        .stored(task.id())
        .expect("read storage")
        .expect("tombstone kept");
    assert!(stored.is_removed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_writes_leave_no_entry(workspace: Workspace) {
    let task = workspace
        .tasks
        .create(draft(&workspace, "Sync engine"))
        .await
        .expect("create");

    let err = workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(task.id(), "archived"))
        .await
        .expect_err("unknown status");
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = workspace
        .tasks
        .create(draft(&workspace, "Assigned").with_assignee("ghost"))
        .await
        .expect_err("unknown assignee");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(workspace.activity.list_all().await.expect("list").len(), 1);

    let everything = TaskQuery::new(PageRequest::default());
    let page = workspace.tasks.list(&everything).await.expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id(), task.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_sorts_and_pages(workspace: Workspace) {
    for (title, priority) in [
        ("Login screen", TaskPriority::High),
        ("Logout flow", TaskPriority::Low),
        ("Settings", TaskPriority::High),
    ] {
        workspace
            .tasks
            .create(draft(&workspace, title).with_priority(priority))
            .await
            .expect("create");
    }

    let page_request = PageRequest::new(1, 10).expect("valid page");
    let query = TaskQuery::new(page_request)
        .with_filter(TaskFilter {
            title_contains: Some("LOG".to_owned()),
            ..TaskFilter::default()
        })
        .with_sort(SortOrder::Ascending);
    let page = workspace.tasks.list(&query).await.expect("list");
    let titles: Vec<_> = page
        .items
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    assert_eq!(page.total, 2);
    assert_eq!(titles, ["Login screen", "Logout flow"]);

    let high = TaskQuery::new(PageRequest::new(2, 1).expect("valid page")).with_filter(
        TaskFilter {
            priority: Some(TaskPriority::High),
            status: Some(TaskStatus::NotStarted),
            ..TaskFilter::default()
        },
    );
    let page = workspace.tasks.list(&high).await.expect("list");
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_by_name_follow_reassignment(workspace: Workspace) {
    let task = workspace
        .tasks
        .create(draft(&workspace, "Sync engine").with_assignee(workspace.admin.name()))
        .await
        .expect("create");
    workspace
        .tasks
        .update(UpdateTaskRequest::new(task.id()).with_assignee(workspace.member.name()))
        .await
        .expect("reassign");

    let mine = workspace
        .tasks
        .find_by_assignee_name(workspace.member.name())
        .await
        .expect("lookup");
    assert_eq!(mine.len(), 1);
    assert!(workspace
        .tasks
        .find_by_assignee_name(workspace.admin.name())
        .await
        .expect("lookup")
        .is_empty());
    assert!(workspace
        .tasks
        .find_by_creator_name("nobody")
        .await
        .expect("lookup")
        .is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_writes_are_rejected_without_an_entry(workspace: Workspace) {
    let task = workspace
        .tasks
        .create(draft(&workspace, "Sync engine"))
        .await
        .expect("create");
    let mut stale = task.clone();

    workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(task.id(), "in_progress"))
        .await
        .expect("first writer wins");

    stale.set_status(TaskStatus::Closed, &DefaultClock);
    let entry = ActivityLogEntry::record(
        workspace.admin.id(),
        workspace.admin.role(),
        ActivityAction::StatusChanged,
        task.id(),
        &DefaultClock,
    );
    let err = workspace
        .task_store
        .update(&stale, task.version(), &entry)
        .await
        .expect_err("stale version");
    assert!(matches!(err, TaskRepositoryError::ConcurrentModification(_)));

    let current = workspace
        .tasks
        .find_by_id(task.id())
        .await
        .expect("find")
        .expect("task exists");
    assert_eq!(current.status(), TaskStatus::InProgress);
    assert_eq!(workspace.activity.list_all().await.expect("list").len(), 2);
}
