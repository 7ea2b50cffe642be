//! Unit tests for the task context.


use crate::project::domain::{ProjectId, TaskNumber, UserId};
use crate::project::services::{CreateProjectRequest, ProjectService};
use crate::store::adapters::memory::InMemoryStore;
use crate::task::domain::{NewTask, Priority, Task, TaskKey, TaskType};
use crate::task::services::{CreateTaskRequest, TaskService};
use mockable::DefaultClock;
use std::sync::Arc;

pub(super) fn task_key(project: &str, number: u64) -> eyre::Result<TaskKey> {
    let task_number =
        TaskNumber::new(number).ok_or_else(|| eyre::eyre!("task numbers start at 1"))?;
    Ok(TaskKey::new(ProjectId::new(project)?, task_number))
}

pub(super) fn new_task(task_type: TaskType) -> eyre::Result<NewTask> {
    Ok(NewTask {
        task_type,
        priority: Priority::default(),
        creator: UserId::new("alice")?,
        assignee: None,
        summary: format!("{task_type} under test"),
        description: String::new(),
        due_date: None,
        estimate: None,
    })
}

pub(super) type TestTaskService = TaskService<InMemoryStore, DefaultClock>;

/// A store with one project, `owner` as its Admin, and a task service on top.
pub(super) struct Harness {
    pub(super) store: Arc<InMemoryStore>,
    pub(super) projects: ProjectService<InMemoryStore>,
    pub(super) tasks: TestTaskService,
    pub(super) project: ProjectId,
    pub(super) owner: UserId,
}

impl Harness {
    pub(super) async fn with_project(project: &str) -> eyre::Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        let projects = ProjectService::new(Arc::clone(&store));
        let owner = UserId::new("alice")?;
        let created = projects
            .create_project(CreateProjectRequest::new(project, "Tracker Test", owner.clone()))
            .await?;
        let tasks = TaskService::new(Arc::clone(&store), Arc::new(DefaultClock));
        Ok(Self {
            store,
            projects,
            tasks,
            project: created.id().clone(),
            owner,
        })
    }

    pub(super) fn request(&self, task_type: TaskType) -> CreateTaskRequest {
        CreateTaskRequest::new(task_type, self.owner.clone(), format!("{task_type} summary"))
            .in_project(self.project.clone())
    }

    pub(super) async fn create(&self, task_type: TaskType) -> eyre::Result<Task> {
        Ok(self.tasks.create_task(self.request(task_type)).await?)
    }
}
