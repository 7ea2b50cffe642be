//! End-to-end checks of the tracker services against `PostgreSQL`.

use std::{sync::Arc, time::Duration};

use backlog::{
    project::domain::{ProjectId, Role, UserId},
    sprint::services::SprintMembershipError,
    store::ports::{StoreError, UnitOfWork},
    task::{
        domain::{TaskKey, TaskStatus, TaskType},
        services::{CreateTaskRequest, TaskServiceError},
    },
};
use eyre::{bail, ensure};
use rstest::rstest;
use tokio::sync::oneshot;

use crate::postgres::helpers::pg_tracker;

fn request(task_type: TaskType, project: &str, parent: Option<&TaskKey>) -> eyre::Result<CreateTaskRequest> {
    let base = CreateTaskRequest::new(task_type, UserId::new("alice")?, format!("{task_type} work"))
        .in_project(ProjectId::new(project)?);
    Ok(match parent {
        Some(key) => base.with_parent(key.clone()),
        None => base,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_numbers_are_sequential_per_project() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    tracker.project("PGA", "alice").await?;
    tracker.project("PGB", "alice").await?;

    let first = tracker.tasks.create_task(request(TaskType::Task, "PGA", None)?).await?;
    let other = tracker.tasks.create_task(request(TaskType::Bug, "PGB", None)?).await?;
    let second = tracker.tasks.create_task(request(TaskType::Task, "PGA", None)?).await?;
    tracker.tasks.delete_task(second.key()).await?;
    let third = tracker.tasks.create_task(request(TaskType::Task, "PGA", None)?).await?;

    ensure!(first.key().to_string() == "PGA-1");
    ensure!(other.key().to_string() == "PGB-1");
    ensure!(third.key().to_string() == "PGA-3");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creations_never_share_a_number() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    tracker.project("PGC", "alice").await?;
    let shared = Arc::new(tracker);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let worker = Arc::clone(&shared);
        handles.push(tokio::spawn(async move {
            worker
                .tasks
                .create_task(request(TaskType::Task, "PGC", None)?)
                .await
                .map_err(eyre::Report::from)
        }));
    }
    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await??.key().number().value());
    }
    numbers.sort_unstable();

    ensure!(numbers == (1..=20).collect::<Vec<u64>>());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hierarchy_workflow_and_sprint_cascade() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    let project = tracker.project("PGD", "alice").await?;
    let epic = tracker.tasks.create_task(request(TaskType::Epic, "PGD", None)?).await?;
    let story = tracker
        .tasks
        .create_task(request(TaskType::Task, "PGD", Some(epic.key()))?)
        .await?;
    let subtask = tracker
        .tasks
        .create_task(request(TaskType::Subtask, "PGD", Some(story.key()))?)
        .await?;

    let nested = tracker.tasks.set_parent(epic.key(), subtask.key()).await;
    ensure!(matches!(nested, Err(TaskServiceError::Domain(_))));

    let moved = tracker
        .tasks
        .change_status(story.key(), TaskStatus::InProgress)
        .await?;
    ensure!(moved.status() == TaskStatus::InProgress);

    let sprint = tracker.sprints.create_sprint(project.id(), "Sprint 1").await?;
    let added = tracker
        .membership
        .add_task_to_sprint(epic.key(), sprint.id())
        .await?;
    ensure!(added == [epic.key().clone(), story.key().clone(), subtask.key().clone()]);

    let blocked = tracker
        .membership
        .remove_task_from_sprint(subtask.key(), sprint.id())
        .await;
    match blocked {
        Err(SprintMembershipError::ParentStillInSprint { parent, .. }) => {
            ensure!(&parent == story.key());
        }
        other => bail!("expected ParentStillInSprint, got {other:?}"),
    }

    tracker.sprints.delete_sprint(sprint.id()).await?;
    let stored = tracker
        .tasks
        .find_task(subtask.key())
        .await?
        .ok_or_else(|| eyre::eyre!("subtask vanished"))?;
    ensure!(stored.sprints().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_delete_cascades_to_members_and_tasks() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    let project = tracker.project("PGE", "alice").await?;
    let bob = UserId::new("bob")?;
    tracker
        .projects
        .add_member(project.id(), bob.clone(), Role::Developer)
        .await?;
    let task = tracker.tasks.create_task(request(TaskType::Task, "PGE", None)?).await?;
    let comment = tracker
        .tasks
        .add_comment(task.key(), bob.clone(), "first")
        .await?;

    tracker.projects.delete_project(project.id()).await?;

    ensure!(tracker.projects.role_of(project.id(), &bob).await?.is_none());
    ensure!(tracker.tasks.find_task(task.key()).await?.is_none());
    let edit = tracker.tasks.edit_comment(comment.id(), "ghost").await;
    ensure!(matches!(edit, Err(TaskServiceError::CommentNotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_watch_keeps_membership_of_closed_sprint() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    let project = tracker.project("PGF", "alice").await?;
    let task = tracker.tasks.create_task(request(TaskType::Task, "PGF", None)?).await?;
    let sprint = tracker.sprints.create_sprint(project.id(), "Sprint 1").await?;

    let (locked_tx, locked_rx) = oneshot::channel();
    let (store, key, carol) = (
        Arc::clone(&tracker.store),
        task.key().clone(),
        UserId::new("carol")?,
    );
    let watcher = tokio::spawn(async move {
        store
            .transact(move |tx| -> Result<bool, StoreError> {
                let mut held = tx
                    .lock_task(&key)?
                    .ok_or_else(|| StoreError::missing("task", &key))?;
                drop(locked_tx.send(()));
                std::thread::sleep(Duration::from_millis(300));
                let added = held.watch(carol);
                tx.update_task(&held)?;
                Ok(added)
            })
            .await
    });
    locked_rx.await?;
    tracker
        .membership
        .add_task_to_sprint(task.key(), sprint.id())
        .await?;
    tracker.sprints.start_sprint(sprint.id()).await?;
    tracker.sprints.close_sprint(sprint.id()).await?;
    ensure!(watcher.await??);

    let stored = tracker
        .tasks
        .find_task(task.key())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    ensure!(stored.in_sprint(sprint.id()), "closed sprint lost its task");
    ensure!(stored.is_watched_by(&UserId::new("carol")?));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn joining_a_second_sprint_keeps_the_first() -> eyre::Result<()> {
    let Some(tracker) = pg_tracker().await? else {
        return Ok(());
    };
    let project = tracker.project("PGG", "alice").await?;
    let epic = tracker.tasks.create_task(request(TaskType::Epic, "PGG", None)?).await?;
    let child = tracker
        .tasks
        .create_task(request(TaskType::Task, "PGG", Some(epic.key()))?)
        .await?;
    let first = tracker.sprints.create_sprint(project.id(), "Sprint 1").await?;
    let second = tracker.sprints.create_sprint(project.id(), "Sprint 2").await?;

    let (left, right) = tokio::join!(
        tracker.membership.add_task_to_sprint(epic.key(), first.id()),
        tracker.membership.add_task_to_sprint(epic.key(), second.id()),
    );
    left?;
    right?;
    tracker.tasks.watch_task(child.key(), UserId::new("bob")?).await?;

    let stored = tracker
        .tasks
        .find_task(child.key())
        .await?
        .ok_or_else(|| eyre::eyre!("child vanished"))?;
    ensure!(stored.in_sprint(first.id()) && stored.in_sprint(second.id()));
    ensure!(stored.observers().len() == 1);
    Ok(())
}
