//! When steps for task status audit BDD scenarios.

use super::world::{TaskAuditWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasktrail::task::services::UpdateTaskStatusRequest;

#[when(r#"the task status is set to "{status}""#)]
fn set_status(world: &mut TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(
        world
            .service
            .update_status(UpdateTaskStatusRequest::new(task_id, status)),
    );
    if let Ok(ref updated) = result {
        world.last_task = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("the task is removed")]
fn remove_task(world: &mut TaskAuditWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.service.remove(task_id)).wrap_err("remove task")
}
