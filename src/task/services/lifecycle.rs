//! Service layer for task creation, workflow and hierarchy.

use crate::config::TrackerConfig;
use crate::error::ErrorKind;
use crate::project::domain::{ProjectDomainError, ProjectId, UserId};
use crate::store::ports::{StoreError, StoreTransaction, UnitOfWork};
use crate::task::domain::{
    CommentId, NewTask, Priority, Task, TaskDetailsUpdate, TaskDomainError, TaskKey, TaskStatus,
    TaskType, text,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Request payload for creating a task.
///
/// A request without a project is accepted by the builder but rejected by
/// [`TaskService::create_task`] with [`TaskServiceError::ProjectRequired`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project: Option<ProjectId>,
    task_type: TaskType,
    creator: UserId,
    summary: String,
    description: Option<String>,
    priority: Priority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    estimate: Option<u32>,
    parent: Option<TaskKey>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(task_type: TaskType, creator: UserId, summary: impl Into<String>) -> Self {
        Self {
            project: None,
            task_type,
            creator,
            summary: summary.into(),
            description: None,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
            estimate: None,
            parent: None,
        }
    }

    /// Sets the owning project.
    #[must_use]
    pub fn in_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the effort estimate.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: u32) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Links the new task under an existing parent.
    #[must_use]
    pub fn with_parent(mut self, parent: TaskKey) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Task validation or a workflow/hierarchy rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The project rejected the operation, for example an exhausted counter.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The request did not name a project.
    #[error("a task must belong to a project")]
    ProjectRequired,
    /// The named project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskKey),
    /// The comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),
}

impl TaskServiceError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Project(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::ProjectRequired
            | Self::ProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::CommentNotFound(_) => ErrorKind::Precondition,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Every operation runs as one unit of work: a rejected rule leaves the
/// store exactly as it was.
#[derive(Clone)]
pub struct TaskService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    pub(super) store: Arc<S>,
    pub(super) clock: Arc<C>,
    pub(super) config: TrackerConfig,
}

impl<S, C> TaskService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new task service with the default limits.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            config: TrackerConfig::default(),
        }
    }

    /// Replaces the limits applied to task text.
    #[must_use]
    pub const fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a task under the next free number of its project.
    ///
    /// The project row stays locked from reading the counter until the new
    /// task is committed, so concurrent creations never share a number.
    /// Numbers of deleted tasks are never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectRequired`] when no project was
    /// named, [`TaskServiceError::ProjectNotFound`] when it does not exist,
    /// [`TaskServiceError::Domain`] for invalid text or parent, and
    /// [`TaskServiceError::Store`] when persistence fails.
    #[instrument(skip_all, fields(task_type = %request.task_type))]
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let project_id = request.project.ok_or(TaskServiceError::ProjectRequired)?;
        let new_task = NewTask {
            task_type: request.task_type,
            priority: request.priority,
            creator: request.creator,
            assignee: request.assignee,
            summary: text::required("summary", &request.summary, self.config.max_summary_length)?,
            description: text::optional(
                "description",
                request.description.as_deref().unwrap_or_default(),
                self.config.max_description_length,
            )?,
            due_date: request.due_date,
            estimate: request.estimate,
        };
        let requested_parent = request.parent;
        let clock = Arc::clone(&self.clock);

        let task = self
            .store
            .transact(move |tx| -> TaskServiceResult<Task> {
                let mut project = tx
                    .lock_project(&project_id)?
                    .ok_or_else(|| TaskServiceError::ProjectNotFound(project_id.clone()))?;
                let number = project.mint_task_number()?;
                tx.update_project(&project)?;

                let mut task = Task::create(TaskKey::new(project_id, number), new_task, &*clock);
                if let Some(parent_key) = requested_parent {
                    let parent_task = load_task(tx, &parent_key)?;
                    task.set_parent(&parent_task, &*clock)?;
                }
                tx.insert_task(&task)?;
                Ok(task)
            })
            .await?;
        info!(task = %task.key(), "task created");
        Ok(task)
    }

    /// Reads a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the lookup fails.
    pub async fn find_task(&self, key: &TaskKey) -> TaskServiceResult<Option<Task>> {
        let target = key.clone();
        self.store
            .transact(move |tx| -> TaskServiceResult<Option<Task>> { Ok(tx.find_task(&target)?) })
            .await
    }

    /// Lists the direct children of a task, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn children_of(&self, key: &TaskKey) -> TaskServiceResult<Vec<Task>> {
        let target = key.clone();
        self.store
            .transact(move |tx| -> TaskServiceResult<Vec<Task>> {
                load_task(tx, &target)?;
                Ok(tx.children_of(&target)?)
            })
            .await
    }

    /// Moves a task to `target` following the status workflow.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncorrectTaskTransition`] (wrapped in
    /// [`TaskServiceError::Domain`]) when the move is not allowed; the task
    /// is left unchanged.
    #[instrument(skip_all, fields(task = %key, target = %target))]
    pub async fn change_status(
        &self,
        key: &TaskKey,
        target: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let task_key = key.clone();
        let clock = Arc::clone(&self.clock);
        let task = self
            .store
            .transact(move |tx| -> TaskServiceResult<Task> {
                let mut task = lock_task(tx, &task_key)?;
                task.change_status(target, &*clock)?;
                tx.update_task(&task)?;
                Ok(task)
            })
            .await
            .inspect_err(|err| warn!(error = %err, "status change rejected"))?;
        info!("task status changed");
        Ok(task)
    }

    /// Links a task under `parent`, replacing any previous parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncorrectTaskRelationship`],
    /// [`TaskDomainError::CrossProjectParent`],
    /// [`TaskDomainError::SelfParent`] or
    /// [`TaskDomainError::HierarchyCycle`] (wrapped in
    /// [`TaskServiceError::Domain`]); the task is left unchanged.
    #[instrument(skip_all, fields(task = %key, parent = %parent))]
    pub async fn set_parent(&self, key: &TaskKey, parent: &TaskKey) -> TaskServiceResult<Task> {
        let (child_key, parent_key) = (key.clone(), parent.clone());
        let clock = Arc::clone(&self.clock);
        let task = self
            .store
            .transact(move |tx| -> TaskServiceResult<Task> {
                let mut child = lock_task(tx, &child_key)?;
                let parent_task = load_task(tx, &parent_key)?;
                child.set_parent(&parent_task, &*clock)?;
                ensure_acyclic(tx, &child_key, &parent_task)?;
                tx.update_task(&child)?;
                Ok(child)
            })
            .await
            .inspect_err(|err| warn!(error = %err, "parent change rejected"))?;
        info!("task parent set");
        Ok(task)
    }

    /// Detaches a task from its parent. Does nothing when unparented.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key))]
    pub async fn clear_parent(&self, key: &TaskKey) -> TaskServiceResult<Task> {
        let target = key.clone();
        let clock = Arc::clone(&self.clock);
        self.store
            .transact(move |tx| -> TaskServiceResult<Task> {
                let mut task = lock_task(tx, &target)?;
                if task.parent().is_some() {
                    task.clear_parent(&*clock);
                    tx.update_task(&task)?;
                }
                Ok(task)
            })
            .await
    }

    /// Applies a partial update of the editable task attributes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the new summary or
    /// description violates the configured limits, and
    /// [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key))]
    pub async fn update_details(
        &self,
        key: &TaskKey,
        mut update: TaskDetailsUpdate,
    ) -> TaskServiceResult<Task> {
        if let Some(summary) = update.summary.take() {
            update.summary = Some(text::required(
                "summary",
                &summary,
                self.config.max_summary_length,
            )?);
        }
        if let Some(description) = update.description.take() {
            update.description = Some(text::optional(
                "description",
                &description,
                self.config.max_description_length,
            )?);
        }
        let target = key.clone();
        let clock = Arc::clone(&self.clock);
        self.store
            .transact(move |tx| -> TaskServiceResult<Task> {
                let mut task = lock_task(tx, &target)?;
                if task.update_details(update, &*clock) {
                    tx.update_task(&task)?;
                }
                Ok(task)
            })
            .await
    }

    /// Deletes a task with its comments, observers and sprint memberships.
    /// Its direct children become top-level tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key))]
    pub async fn delete_task(&self, key: &TaskKey) -> TaskServiceResult<()> {
        let target = key.clone();
        self.store
            .transact(move |tx| -> TaskServiceResult<()> {
                if tx.delete_task(&target)? {
                    Ok(())
                } else {
                    Err(TaskServiceError::TaskNotFound(target))
                }
            })
            .await?;
        info!("task deleted");
        Ok(())
    }
}

/// Reads a task that must exist.
pub(super) fn load_task(
    tx: &mut dyn StoreTransaction,
    key: &TaskKey,
) -> TaskServiceResult<Task> {
    tx.find_task(key)?
        .ok_or_else(|| TaskServiceError::TaskNotFound(key.clone()))
}

/// Reads a task that must exist and locks its row for the rest of the
/// transaction.
pub(super) fn lock_task(
    tx: &mut dyn StoreTransaction,
    key: &TaskKey,
) -> TaskServiceResult<Task> {
    tx.lock_task(key)?
        .ok_or_else(|| TaskServiceError::TaskNotFound(key.clone()))
}

/// Walks the ancestors of `parent` and fails if `task` is among them.
///
/// Stops at the first repeated ancestor so that corrupt links elsewhere in
/// the hierarchy cannot loop forever.
fn ensure_acyclic(
    tx: &mut dyn StoreTransaction,
    task: &TaskKey,
    parent: &Task,
) -> TaskServiceResult<()> {
    let mut visited = BTreeSet::new();
    let mut cursor = parent.parent().cloned();
    while let Some(ancestor) = cursor {
        if &ancestor == task {
            return Err(TaskDomainError::HierarchyCycle {
                task: task.clone(),
                parent: parent.key().clone(),
            }
            .into());
        }
        if !visited.insert(ancestor.clone()) {
            break;
        }
        cursor = tx
            .find_task(&ancestor)?
            .and_then(|found| found.parent().cloned());
    }
    Ok(())
}
