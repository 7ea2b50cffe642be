//! Sprint lifecycle combined with recursive membership.

use backlog::{
    sprint::{domain::SprintStatus, services::SprintMembershipError},
    task::{domain::TaskType, services::CreateTaskRequest},
};
use rstest::rstest;

use super::helpers::{Tracker, tracker, user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_planning_round_trip(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("SPR", "alice").await?;
    let creator = user("alice")?;
    let epic = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new(TaskType::Epic, creator.clone(), "checkout")
                .in_project(project.id().clone()),
        )
        .await?;
    let mut children = Vec::new();
    for task_type in [TaskType::Task, TaskType::Bug, TaskType::Support] {
        children.push(
            tracker
                .tasks
                .create_task(
                    CreateTaskRequest::new(task_type, creator.clone(), "child")
                        .in_project(project.id().clone())
                        .with_parent(epic.key().clone()),
                )
                .await?,
        );
    }
    let sprint = tracker.sprints.create_sprint(project.id(), "Sprint 1").await?;

    let added = tracker
        .membership
        .add_task_to_sprint(epic.key(), sprint.id())
        .await?;
    eyre::ensure!(added.len() == 4);

    tracker
        .sprints
        .change_status(sprint.id(), SprintStatus::Started)
        .await?;
    let removed = tracker
        .membership
        .remove_task_from_sprint(epic.key(), sprint.id())
        .await?;
    eyre::ensure!(removed.len() == 4);

    tracker.membership.add_task_to_sprint(epic.key(), sprint.id()).await?;
    tracker
        .sprints
        .change_status(sprint.id(), SprintStatus::Closed)
        .await?;

    let frozen = tracker
        .membership
        .remove_task_from_sprint(epic.key(), sprint.id())
        .await;
    eyre::ensure!(matches!(frozen, Err(SprintMembershipError::SprintClosed(_))));
    for child in &children {
        let stored = tracker
            .tasks
            .find_task(child.key())
            .await?
            .ok_or_else(|| eyre::eyre!("child {} vanished", child.key()))?;
        eyre::ensure!(stored.in_sprint(sprint.id()));
    }
    Ok(())
}
