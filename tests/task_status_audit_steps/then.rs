//! Then steps for task status audit BDD scenarios.

use super::world::{TaskAuditWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasktrail::activity::ports::ActivityLogRepository;
use tasktrail::error::ErrorKind;
use tasktrail::task::domain::TaskStatus;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.task()?.status();
    if actual != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            actual.as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task history is "{actions}""#)]
fn task_history_is(world: &TaskAuditWorld, actions: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let history = run_async(world.activity.list_by_task(task_id)).wrap_err("load history")?;
    let recorded = history
        .iter()
        .map(|entry| entry.action().as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if recorded != actions {
        return Err(eyre::eyre!("expected history {actions}, found {recorded}"));
    }
    Ok(())
}

#[then("the status change fails as a bad request")]
fn status_change_is_bad_request(world: &TaskAuditWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing status change result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::BadRequest => Ok(()),
        other => Err(eyre::eyre!("expected a bad request, got {other:?}")),
    }
}

#[then("the task can no longer be found")]
fn task_is_gone(world: &TaskAuditWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let found = run_async(world.service.find_by_id(task_id)).wrap_err("find task")?;
    if found.is_some() {
        return Err(eyre::eyre!("task {task_id} is still visible"));
    }
    Ok(())
}
