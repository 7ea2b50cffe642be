//! Unit tests for the sprint context.


use crate::config::TrackerConfig;
use crate::project::domain::{ProjectId, UserId};
use crate::project::services::{CreateProjectRequest, ProjectService};
use crate::sprint::domain::Sprint;
use crate::sprint::services::{SprintMembershipService, SprintService};
use crate::store::adapters::memory::InMemoryStore;
use crate::task::domain::{Task, TaskKey, TaskType};
use crate::task::services::{CreateTaskRequest, TaskService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Services sharing one in-memory store seeded with projects `SPR` and `OTH`.
pub(super) struct Harness {
    pub(super) project: ProjectId,
    pub(super) other_project: ProjectId,
    pub(super) owner: UserId,
    pub(super) sprints: SprintService<InMemoryStore, DefaultClock>,
    pub(super) membership: SprintMembershipService<InMemoryStore, DefaultClock>,
    pub(super) tasks: TaskService<InMemoryStore, DefaultClock>,
}

impl Harness {
    pub(super) async fn new() -> eyre::Result<Self> {
        Self::with_config(&TrackerConfig::default()).await
    }

    pub(super) async fn with_config(config: &TrackerConfig) -> eyre::Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        let owner = UserId::new("alice")?;
        let projects = ProjectService::new(Arc::clone(&store));
        let project = projects
            .create_project(CreateProjectRequest::new("SPR", "Sprint Test", owner.clone()))
            .await?;
        let other_project = projects
            .create_project(CreateProjectRequest::new("OTH", "Other Test", owner.clone()))
            .await?;
        Ok(Self {
            project: project.id().clone(),
            other_project: other_project.id().clone(),
            owner,
            sprints: SprintService::new(Arc::clone(&store), Arc::clone(&clock)),
            membership: SprintMembershipService::new(Arc::clone(&store), Arc::clone(&clock))
                .with_config(config),
            tasks: TaskService::new(store, clock),
        })
    }

    pub(super) async fn sprint(&self, name: &str) -> eyre::Result<Sprint> {
        Ok(self.sprints.create_sprint(&self.project, name).await?)
    }

    pub(super) async fn task(
        &self,
        task_type: TaskType,
        parent: Option<&TaskKey>,
    ) -> eyre::Result<Task> {
        let mut request =
            CreateTaskRequest::new(task_type, self.owner.clone(), format!("{task_type} item"))
                .in_project(self.project.clone());
        if let Some(key) = parent {
            request = request.with_parent(key.clone());
        }
        Ok(self.tasks.create_task(request).await?)
    }

    pub(super) async fn stored(&self, key: &TaskKey) -> eyre::Result<Task> {
        self.tasks
            .find_task(key)
            .await?
            .ok_or_else(|| eyre::eyre!("task {key} vanished"))
    }
}
