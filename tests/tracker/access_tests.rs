//! Role checks backed by real project memberships.

use backlog::project::{domain::Role, services::ProjectOperation};
use rstest::rstest;

use super::helpers::{Tracker, tracker, user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_may_do_everything(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("ACL", "alice").await?;
    let alice = user("alice")?;

    for operation in [
        ProjectOperation::ViewTasks,
        ProjectOperation::CreateTask,
        ProjectOperation::DeleteProject,
    ] {
        eyre::ensure!(
            tracker
                .authorization
                .permit_operation(&alice, project.id(), operation)
                .await,
            "creator denied {operation:?}"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_changes_take_effect_immediately(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("ACL", "alice").await?;
    let bob = user("bob")?;

    eyre::ensure!(!tracker.authorization.permit(&bob, project.id(), Role::Viewer).await);

    tracker
        .projects
        .add_member(project.id(), bob.clone(), Role::Viewer)
        .await?;
    eyre::ensure!(tracker.authorization.permit(&bob, project.id(), Role::Viewer).await);
    eyre::ensure!(!tracker.authorization.permit(&bob, project.id(), Role::Developer).await);

    tracker
        .projects
        .add_member(project.id(), bob.clone(), Role::Developer)
        .await?;
    tracker
        .authorization
        .require(&bob, project.id(), Role::Developer)
        .await?;

    tracker.projects.remove_member(project.id(), &bob).await?;
    eyre::ensure!(!tracker.authorization.permit(&bob, project.id(), Role::Viewer).await);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_is_scoped_to_one_project(tracker: Tracker) -> eyre::Result<()> {
    let first = tracker.project("ONE", "alice").await?;
    let second = tracker.project("TWO", "carol").await?;
    let alice = user("alice")?;

    eyre::ensure!(tracker.authorization.permit(&alice, first.id(), Role::Admin).await);
    eyre::ensure!(!tracker.authorization.permit(&alice, second.id(), Role::Viewer).await);
    Ok(())
}
