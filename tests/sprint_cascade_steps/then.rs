//! Then steps for sprint cascade BDD scenarios.

use super::world::{SprintCascadeWorld, run_async};
use backlog::sprint::services::SprintMembershipError;
use rstest_bdd_macros::then;

#[then("{count:usize} tasks are in the sprint")]
fn tasks_in_sprint(world: &SprintCascadeWorld, count: usize) -> Result<(), eyre::Report> {
    let sprint = world.sprint()?.id();
    let mut members = 0;
    for task in &world.tree {
        let stored = run_async(world.tasks.find_task(task.key()))?
            .ok_or_else(|| eyre::eyre!("task {} vanished", task.key()))?;
        if stored.in_sprint(sprint) {
            members += 1;
        }
    }
    if members != count {
        return Err(eyre::eyre!("expected {count} tasks in the sprint, found {members}"));
    }
    Ok(())
}

#[then("the request fails because the parent is still in the sprint")]
fn fails_parent_still_in_sprint(world: &SprintCascadeWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing membership result"))?;
    if !matches!(result, Err(SprintMembershipError::ParentStillInSprint { .. })) {
        return Err(eyre::eyre!("expected ParentStillInSprint, got {result:?}"));
    }
    Ok(())
}

#[then("the request fails because the sprint is closed")]
fn fails_sprint_closed(world: &SprintCascadeWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing membership result"))?;
    if !matches!(result, Err(SprintMembershipError::SprintClosed(_))) {
        return Err(eyre::eyre!("expected SprintClosed, got {result:?}"));
    }
    Ok(())
}
