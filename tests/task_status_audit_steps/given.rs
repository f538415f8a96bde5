//! Given steps for task status audit BDD scenarios.

use super::world::{TaskAuditWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrail::directory::{
    domain::{Project, User, UserRole},
    ports::UserDirectory,
};
use tasktrail::task::services::CreateTaskRequest;

#[given(r#"an admin user "{name}""#)]
fn admin_user(world: &mut TaskAuditWorld, name: String) -> Result<(), eyre::Report> {
    let email = format!("{name}@example.com");
    world
        .directory
        .insert_user(User::new(name, email, UserRole::Admin))
        .wrap_err("register admin user")
}

#[given(r#"a project "{project}" owned by "{owner}""#)]
fn project_owned_by(
    world: &mut TaskAuditWorld,
    project: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let owner = run_async(world.directory.find_by_name(&owner))
        .wrap_err("look up project owner")?
        .ok_or_else(|| eyre::eyre!("unknown project owner {owner}"))?;
    let project = Project::new(project, "", owner.id());
    world
        .directory
        .insert_project(project.clone())
        .wrap_err("register project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task "{title}" created by "{creator}""#)]
fn task_created_by(
    world: &mut TaskAuditWorld,
    title: String,
    creator: String,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?
        .id();
    let request = CreateTaskRequest::new(title, "", Utc::now(), creator, project_id);
    let task = run_async(world.service.create(request)).wrap_err("create task")?;
    world.last_task = Some(task);
    Ok(())
}
