//! Burndown integration tests over service-created tasks.

use super::helpers::{Workspace, workspace};
use chrono::Utc;
use rstest::rstest;
use tasktrail::report::domain::BurndownPoint;
use tasktrail::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, UpdateTaskStatusRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn today_reflects_current_statuses(workspace: Workspace) {
    let mut ids = Vec::new();
    for (title, status) in [
        ("Ship", TaskStatus::Completed),
        ("Build", TaskStatus::InProgress),
        ("Plan", TaskStatus::NotStarted),
        ("Drop", TaskStatus::Closed),
    ] {
        let task = workspace
            .tasks
            .create(
                CreateTaskRequest::new(
                    title,
                    "",
                    Utc::now(),
                    workspace.admin.name(),
                    workspace.project.id(),
                )
                .with_status(status),
            )
            .await
            .expect("create");
        ids.push(task.id());
    }
    workspace
        .tasks
        .update_status(UpdateTaskStatusRequest::new(ids[2], "completed"))
        .await
        .expect("complete plan");

    let today = Utc::now().date_naive();
    let series = workspace
        .burndown
        .compute(workspace.project.id(), today, today)
        .await
        .expect("burndown");

    assert_eq!(
        series,
        [BurndownPoint {
            date: today,
            completed_count: 2,
            in_progress_count: 1,
            not_started_count: 0,
        }]
    );
}
