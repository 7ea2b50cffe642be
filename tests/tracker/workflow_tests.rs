//! End-to-end task workflow on the in-memory store.

use backlog::{
    error::ErrorKind,
    task::{
        domain::{TaskStatus, TaskType},
        services::{CreateTaskRequest, TaskServiceError},
    },
};
use rstest::rstest;

use super::helpers::{Tracker, tracker, user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_number_their_tasks_independently(tracker: Tracker) -> eyre::Result<()> {
    let alpha = tracker.project("ALP", "alice").await?;
    let beta = tracker.project("BET", "alice").await?;
    let creator = user("alice")?;

    let mut keys = Vec::new();
    for project in [&alpha, &beta, &alpha] {
        let task = tracker
            .tasks
            .create_task(
                CreateTaskRequest::new(TaskType::Task, creator.clone(), "work")
                    .in_project(project.id().clone()),
            )
            .await?;
        keys.push(task.key().to_string());
    }

    eyre::ensure!(keys == ["ALP-1", "BET-1", "ALP-2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initiative_tree_is_built_and_worked_through(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("TTP", "alice").await?;
    let creator = user("alice")?;
    let request = |task_type: TaskType| {
        CreateTaskRequest::new(task_type, creator.clone(), format!("{task_type} work"))
            .in_project(project.id().clone())
    };

    let initiative = tracker.tasks.create_task(request(TaskType::Initiative)).await?;
    let epic = tracker
        .tasks
        .create_task(request(TaskType::Epic).with_parent(initiative.key().clone()))
        .await?;
    let bug = tracker
        .tasks
        .create_task(request(TaskType::Bug).with_parent(epic.key().clone()))
        .await?;

    for status in [TaskStatus::InProgress, TaskStatus::InReview, TaskStatus::Closed] {
        tracker.tasks.change_status(bug.key(), status).await?;
    }
    let reopened = tracker
        .tasks
        .change_status(bug.key(), TaskStatus::ToDo)
        .await?;

    eyre::ensure!(reopened.close_date().is_none());
    eyre::ensure!(reopened.parent() == Some(epic.key()));
    let children = tracker.tasks.children_of(initiative.key()).await?;
    eyre::ensure!(children.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_cannot_be_nested_below_its_own_subtask(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("TTP", "alice").await?;
    let creator = user("alice")?;
    let story = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new(TaskType::Task, creator.clone(), "story")
                .in_project(project.id().clone()),
        )
        .await?;
    let subtask = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new(TaskType::Subtask, creator, "step")
                .in_project(project.id().clone())
                .with_parent(story.key().clone()),
        )
        .await?;

    let result = tracker.tasks.set_parent(story.key(), subtask.key()).await;

    match result {
        Err(err @ TaskServiceError::Domain(_)) => {
            eyre::ensure!(err.kind() == ErrorKind::StateTransition);
        }
        other => eyre::bail!("expected a rejected relationship, got {other:?}"),
    }
    Ok(())
}
