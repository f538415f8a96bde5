//! Comment thread integration tests against in-memory adapters.

use super::helpers::{Workspace, workspace};
use chrono::Utc;
use rstest::rstest;
use tasktrail::activity::domain::ActivityAction;
use tasktrail::comment::services::{CreateCommentRequest, UpdateCommentRequest};
use tasktrail::error::ErrorKind;
use tasktrail::task::{domain::TaskId, services::CreateTaskRequest};

async fn task(workspace: &Workspace) -> TaskId {
    workspace
        .tasks
        .create(CreateTaskRequest::new(
            "Crash on resume",
            "",
            Utc::now(),
            workspace.admin.name(),
            workspace.project.id(),
        ))
        .await
        .expect("create task")
        .id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_parent_keeps_its_replies(workspace: Workspace) {
    let task_id = task(&workspace).await;
    let root = workspace
        .comments
        .create(CreateCommentRequest::new(task_id, "Repro steps?").with_author(workspace.admin.id()))
        .await
        .expect("root");
    let reply = workspace
        .comments
        .create(
            CreateCommentRequest::new(task_id, "Open, lock, resume")
                .with_author(workspace.member.id())
                .with_parent(root.id()),
        )
        .await
        .expect("reply");

    workspace
        .comments
        .remove(root.id(), workspace.admin.id(), workspace.admin.role())
        .await
        .expect("remove root");

    let page = workspace
        .comments
        .list_by_task(task_id, 1, 10)
        .await
        .expect("list");
    let [view] = page.items.as_slice() else {
        panic!("expected only the reply, got {:?}", page.items);
    };
    assert_eq!(view.comment.id(), reply.id());
    assert!(view.parent.is_none());
    assert_eq!(view.comment.parent_id(), Some(root.id()));

    let err = workspace
        .comments
        .list_replies(root.id())
        .await
        .expect_err("removed parent");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_removal_joins_the_task_history(workspace: Workspace) {
    let task_id = task(&workspace).await;
    let comment = workspace
        .comments
        .create(CreateCommentRequest::new(task_id, "Dup of #12").with_author(workspace.member.id()))
        .await
        .expect("comment");
    workspace
        .comments
        .update(
            UpdateCommentRequest::new(comment.id())
                .with_actor(workspace.member.id())
                .with_content("Not a dup after all"),
        )
        .await
        .expect("edit");
    workspace
        .comments
        .remove(comment.id(), workspace.member.id(), workspace.member.role())
        .await
        .expect("remove");

    let history = workspace
        .activity
        .list_by_task(task_id)
        .await
        .expect("history");
    let actions: Vec<_> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        [ActivityAction::CommentDeleted, ActivityAction::Created]
    );
    assert_eq!(history[0].user_id(), workspace.member.id());
    assert_eq!(history[0].project_id(), None);

    let stored = workspace
        .comment_store
        .stored(comment.id())
        .expect("read storage")
        .expect("tombstone kept");
    assert!(stored.is_removed());
    assert!(stored.is_edited());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_on_removed_tasks_are_rejected(workspace: Workspace) {
    let task_id = task(&workspace).await;
    workspace.tasks.remove(task_id).await.expect("remove task");

    let err = workspace
        .comments
        .create(CreateCommentRequest::new(task_id, "Too late"))
        .await
        .expect_err("removed task");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
