//! Service orchestration tests for task lifecycle operations.

use std::sync::Arc;

use crate::activity::{
    adapters::InMemoryActivityLog,
    domain::{ActivityAction, ActivityLogEntry},
    ports::ActivityLogRepository,
};
use crate::directory::{
    adapters::InMemoryDirectory,
    domain::{Project, ProjectId, User, UserRole},
    ports::{DirectoryError, MockUserDirectory},
};
use crate::error::ErrorKind;
use crate::task::{
    adapters::InMemoryTaskRepository,
    domain::{NewTask, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
    services::{
        CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest,
        UpdateTaskStatusRequest,
    },
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, InMemoryDirectory, DefaultClock>;

struct Harness {
    service: TestService,
    repository: InMemoryTaskRepository,
    activity: InMemoryActivityLog,
    directory: InMemoryDirectory,
    admin: User,
    member: User,
    project: Project,
}

#[fixture]
fn harness() -> Harness {
    let activity = InMemoryActivityLog::new();
    let repository = InMemoryTaskRepository::new(activity.clone());
    let directory = InMemoryDirectory::new();
    let admin = User::new("nilgun", "nilgun@example.com", UserRole::Admin);
    let member = User::new("ayse", "ayse@example.com", UserRole::User);
    directory.insert_user(admin.clone()).expect("insert admin");
    directory.insert_user(member.clone()).expect("insert member");
    let project = Project::new("Website", "Relaunch", admin.id());
    directory
        .insert_project(project.clone())
        .expect("insert project");

    let directory_arc = Arc::new(directory.clone());
    let service = TaskLifecycleService::new(
        Arc::new(repository.clone()),
        Arc::clone(&directory_arc),
        directory_arc,
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        repository,
        activity,
        directory,
        admin,
        member,
        project,
    }
}

fn request(harness: &Harness, creator: &str) -> CreateTaskRequest {
    CreateTaskRequest::new("Draft roadmap", "Q3 goals", Utc::now(), creator, harness.project.id())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_and_records_creation(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "nilgun").with_assignee("ayse"))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::NotStarted);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.assigned_to(), Some(harness.member.id()));

    let entries = harness.activity.list_all().await.expect("list entries");
    let [entry] = entries.as_slice() else {
        panic!("expected one entry, got {entries:?}");
    };
    assert_eq!(entry.action(), ActivityAction::Created);
    assert_eq!(entry.user_id(), harness.admin.id());
    assert_eq!(entry.role(), UserRole::Admin);
    assert_eq!(entry.project_id(), Some(harness.project.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_checks_project_before_users(harness: Harness) {
    let missing_project =
        CreateTaskRequest::new("Draft", "", Utc::now(), "nobody", ProjectId::new());
    let err = harness
        .service
        .create(missing_project)
        .await
        .expect_err("unknown project should fail");

    assert!(matches!(
        err,
        crate::task::services::TaskLifecycleError::ProjectNotFound(_)
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_titles_without_writing(harness: Harness) {
    let blank = CreateTaskRequest::new("  ", "", Utc::now(), "nilgun", harness.project.id());
    let err = harness.service.create(blank).await.expect_err("blank title");

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(harness.activity.list_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_attributed_to_the_creator(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "ayse"))
        .await
        .expect("create");

    let updated = harness
        .service
        .update(UpdateTaskRequest::new(task.id()).with_priority(TaskPriority::High))
        .await
        .expect("update should succeed");

    assert_eq!(updated.priority(), TaskPriority::High);
    assert_eq!(updated.title(), task.title());
    let latest = harness
        .activity
        .list_by_task(task.id())
        .await
        .expect("list")
        .into_iter()
        .next()
        .expect("latest entry");
    assert_eq!(latest.action(), ActivityAction::Update);
    assert_eq!(latest.user_id(), harness.member.id());
    assert_eq!(latest.role(), UserRole::User);
}

#[rstest]
#[case("in_progress", ActivityAction::InProgress)]
#[case("completed", ActivityAction::StatusChanged)]
#[case("open", ActivityAction::StatusChanged)]
#[case("not_started", ActivityAction::StatusChanged)]
#[case("closed", ActivityAction::StatusChanged)]
#[tokio::test(flavor = "multi_thread")]
async fn status_changes_pick_the_audit_action(
    harness: Harness,
    #[case] status: &str,
    #[case] expected: ActivityAction,
) {
    let task = harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");

    harness
        .service
        .update_status(UpdateTaskStatusRequest::new(task.id(), status))
        .await
        .expect("status change should succeed");

    let latest = harness
        .activity
        .list_by_task(task.id())
        .await
        .expect("list")
        .into_iter()
        .next()
        .expect("latest entry");
    assert_eq!(latest.action(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_text_is_a_bad_request(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");

    let err = harness
        .service
        .update_status(UpdateTaskStatusRequest::new(task.id(), "archived"))
        .await
        .expect_err("unknown status");

    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_creator_is_fatal(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "ayse"))
        .await
        .expect("create");
    harness
        .directory
        .remove_user(harness.member.id())
        .expect("remove user");

    let err = harness
        .service
        .update_status(UpdateTaskStatusRequest::new(task.id(), "completed"))
        .await
        .expect_err("creator is gone");

    assert_eq!(err.kind(), ErrorKind::Fatal);
    let stored = harness
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("task still live");
    assert_eq!(stored.status(), TaskStatus::NotStarted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_hides_the_task_but_keeps_its_audit(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");

    harness.service.remove(task.id()).await.expect("remove");

    assert!(harness
        .service
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .is_none());
    let stored = harness
        .repository
        .stored(task.id())
        .expect("raw lookup")
        .expect("tombstone kept");
    assert!(stored.is_removed());
    let actions: Vec<_> = harness
        .activity
        .list_by_task(task.id())
        .await
        .expect("list")
        .iter()
        .map(|entry| entry.action())
        .collect();
    assert_eq!(actions, vec![ActivityAction::Deleted, ActivityAction::Created]);

    let again = harness.service.remove(task.id()).await;
    assert_eq!(again.map_err(|err| err.kind()), Err(ErrorKind::NotFound));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_names_yield_empty_lookups(harness: Harness) {
    harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");

    let by_creator = harness
        .service
        .find_by_creator_name("nobody")
        .await
        .expect("lookup");
    let by_known = harness
        .service
        .find_by_creator_name("nilgun")
        .await
        .expect("lookup");

    assert!(by_creator.is_empty());
    assert_eq!(by_known.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_failures_surface_as_storage_errors() {
    let mut users = MockUserDirectory::new();
    users
        .expect_find_by_name()
        .returning(|_| Err(DirectoryError::persistence(std::io::Error::other("down"))));
    let projects = InMemoryDirectory::new();
    let owner = User::new("owner", "owner@example.com", UserRole::Admin);
    let project = Project::new("Ops", "", owner.id());
    projects.insert_project(project.clone()).expect("insert project");
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new(InMemoryActivityLog::new())),
        Arc::new(users),
        Arc::new(projects),
        Arc::new(DefaultClock),
    );

    let err = service
        .create(CreateTaskRequest::new("Patch", "", Utc::now(), "owner", project.id()))
        .await
        .expect_err("directory is down");

    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_unknown_creator_is_not_found(harness: Harness) {
    let err = harness
        .service
        .create(request(&harness, "nobody"))
        .await
        .expect_err("unknown creator");

    assert!(matches!(err, TaskLifecycleError::CreatorNotFound(ref name) if name == "nobody"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(harness.activity.list_all().await.expect("list").is_empty());
}

#[rstest]
#[case::creator("creator")]
#[case::assignee("assignee")]
#[tokio::test(flavor = "multi_thread")]
async fn update_reports_which_name_did_not_resolve(harness: Harness, #[case] field: &str) {
    let task = harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");

    let err = harness
        .service
        .update(match field {
            "creator" => UpdateTaskRequest::new(task.id()).with_creator("ghost"),
            _ => UpdateTaskRequest::new(task.id()).with_assignee("ghost"),
        })
        .await
        .expect_err("unknown name");

    match (field, &err) {
        ("creator", TaskLifecycleError::CreatorNotFound(name))
        | ("assignee", TaskLifecycleError::AssigneeNotFound(name)) => assert_eq!(name, "ghost"),
        _ => panic!("unexpected error for {field}: {err:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(harness.activity.list_all().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_on_unknown_tasks_are_not_found(harness: Harness) {
    let missing = TaskId::new();

    let update = harness
        .service
        .update(UpdateTaskRequest::new(missing).with_title("   "))
        .await
        .expect_err("unknown task");
    let status = harness
        .service
        .update_status(UpdateTaskStatusRequest::new(missing, "completed"))
        .await
        .expect_err("unknown task");
    let remove = harness
        .service
        .remove(missing)
        .await
        .expect_err("unknown task");

    for err in [update, status, remove] {
        assert!(matches!(err, TaskLifecycleError::TaskNotFound(id) if id == missing));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
    assert!(harness.activity.list_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_names_count_as_not_supplied(harness: Harness) {
    let task = harness
        .service
        .create(request(&harness, "nilgun").with_assignee(""))
        .await
        .expect("blank assignee is ignored");
    assert_eq!(task.assigned_to(), None);

    let updated = harness
        .service
        .update(
            UpdateTaskRequest::new(task.id())
                .with_creator(" ")
                .with_assignee(""),
        )
        .await
        .expect("blank names are ignored");
    assert_eq!(updated.created_by(), harness.admin.id());
    assert_eq!(updated.assigned_to(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_audit_append_hides_a_new_task(harness: Harness) {
    let task = Task::new(
        NewTask {
            title: TaskTitle::new("Audit me").expect("valid title"),
            description: String::new(),
            status: TaskStatus::NotStarted,
            priority: TaskPriority::Medium,
            due_date: Utc::now(),
            created_by: harness.admin.id(),
            assigned_to: None,
            project_id: harness.project.id(),
        },
        &DefaultClock,
    );
    let entry = ActivityLogEntry::record(
        harness.admin.id(),
        UserRole::Admin,
        ActivityAction::Created,
        task.id(),
        &DefaultClock,
    );
    harness.activity.append(&entry).await.expect("first append");

    let err = harness
        .repository
        .store(&task, &entry)
        .await
        .expect_err("entry id is taken");

    assert!(matches!(err, TaskRepositoryError::AuditAppend(_)));
    assert_eq!(TaskLifecycleError::from(err).kind(), ErrorKind::Storage);
    assert!(harness.repository.stored(task.id()).expect("read").is_none());
    assert_eq!(harness.activity.list_all().await.expect("list").len(), 1);
}

#[rstest]
#[case::update(false)]
#[case::remove(true)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_audit_append_leaves_the_task_unchanged(
    harness: Harness,
    #[case] removing: bool,
) {
    let task = harness
        .service
        .create(request(&harness, "nilgun"))
        .await
        .expect("create");
    let created = harness
        .activity
        .list_by_task(task.id())
        .await
        .expect("list")
        .into_iter()
        .next()
        .expect("creation entry");

    let mut changed = task.clone();
    let result = if removing {
        changed.mark_removed(&DefaultClock);
        harness
            .repository
            .remove(&changed, task.version(), &created)
            .await
    } else {
        changed.set_status(TaskStatus::Completed, &DefaultClock);
        harness
            .repository
            .update(&changed, task.version(), &created)
            .await
    };

    let err = result.expect_err("entry id is taken");
    assert!(matches!(err, TaskRepositoryError::AuditAppend(_)));
    assert_eq!(TaskLifecycleError::from(err).kind(), ErrorKind::Storage);
    let stored = harness
        .repository
        .stored(task.id())
        .expect("read")
        .expect("task kept");
    assert_eq!(stored, task);
    assert_eq!(harness.activity.list_all().await.expect("list").len(), 1);
}
