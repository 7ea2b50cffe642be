//! Given steps for sprint cascade BDD scenarios.

use super::world::{SprintCascadeWorld, run_async};
use backlog::{
    project::{domain::UserId, services::CreateProjectRequest},
    task::{domain::TaskType, services::CreateTaskRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project "{id}" owned by "{owner}""#)]
fn project_owned_by(
    world: &mut SprintCascadeWorld,
    id: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let request = CreateProjectRequest::new(id, "Cascade board", UserId::new(owner)?);
    let project = run_async(world.projects.create_project(request))
        .wrap_err("create project for cascade scenario")?;
    world.project = Some(project.id().clone());
    Ok(())
}

#[given("an epic with a task and a subtask below it")]
fn epic_chain(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    let project = world.project()?.clone();
    let creator = UserId::new("alice")?;
    let mut parent = None;
    for task_type in [TaskType::Epic, TaskType::Task, TaskType::Subtask] {
        let mut request = CreateTaskRequest::new(task_type, creator.clone(), "cascade")
            .in_project(project.clone());
        if let Some(key) = parent.take() {
            request = request.with_parent(key);
        }
        let task = run_async(world.tasks.create_task(request))
            .wrap_err_with(|| format!("create {task_type} for cascade scenario"))?;
        parent = Some(task.key().clone());
        world.tree.push(task);
    }
    Ok(())
}

#[given(r#"a sprint named "{name}""#)]
fn sprint_named(world: &mut SprintCascadeWorld, name: String) -> Result<(), eyre::Report> {
    let project = world.project()?.clone();
    let sprint = run_async(world.sprints.create_sprint(&project, name))
        .wrap_err("create sprint for cascade scenario")?;
    world.sprint = Some(sprint);
    Ok(())
}

#[given("the epic has been added to the sprint")]
fn epic_added(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    let epic = world.tree_node(0)?.key().clone();
    let sprint = world.sprint()?.id();
    run_async(world.membership.add_task_to_sprint(&epic, sprint))
        .wrap_err("add epic to sprint in scenario setup")?;
    Ok(())
}

#[given("the sprint has been started and closed")]
fn sprint_started_and_closed(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    let sprint = world.sprint()?.id();
    run_async(world.sprints.start_sprint(sprint)).wrap_err("start sprint")?;
    let closed = run_async(world.sprints.close_sprint(sprint)).wrap_err("close sprint")?;
    world.sprint = Some(closed);
    Ok(())
}
