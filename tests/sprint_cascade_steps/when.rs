//! When steps for sprint cascade BDD scenarios.

use super::world::{SprintCascadeWorld, run_async};
use rstest_bdd_macros::when;

#[when("the epic is added to the sprint")]
fn add_epic(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    let epic = world.tree_node(0)?.key().clone();
    let sprint = world.sprint()?.id();
    world.last_result = Some(run_async(world.membership.add_task_to_sprint(&epic, sprint)));
    Ok(())
}

#[when("the epic is removed from the sprint")]
fn remove_epic(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    remove_at(world, 0)
}

#[when("the task is removed from the sprint")]
fn remove_task(world: &mut SprintCascadeWorld) -> Result<(), eyre::Report> {
    remove_at(world, 1)
}

fn remove_at(world: &mut SprintCascadeWorld, depth: usize) -> Result<(), eyre::Report> {
    let key = world.tree_node(depth)?.key().clone();
    let sprint = world.sprint()?.id();
    world.last_result = Some(run_async(
        world.membership.remove_task_from_sprint(&key, sprint),
    ));
    Ok(())
}
