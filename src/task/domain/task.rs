//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskKey, TaskStatus, TaskType, can_nest};
use crate::project::domain::{ProjectId, UserId};
use crate::sprint::domain::SprintId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attributes supplied when a task is created.
///
/// Text fields are expected to be validated already; see
/// [`super::text::required`] and [`super::text::optional`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Kind of work item.
    pub task_type: TaskType,
    /// Initial priority.
    pub priority: Priority,
    /// User creating the task.
    pub creator: UserId,
    /// Initial assignee, if any.
    pub assignee: Option<UserId>,
    /// One-line summary.
    pub summary: String,
    /// Longer description, possibly empty.
    pub description: String,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional effort estimate.
    pub estimate: Option<u32>,
}

/// Partial update of the editable task attributes.
///
/// `None` leaves a field unchanged. For nullable fields, `Some(None)` clears
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// New summary.
    pub summary: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New assignee, or `Some(None)` to unassign.
    pub assignee: Option<Option<UserId>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New deadline, or `Some(None)` to clear it.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// New estimate, or `Some(None)` to clear it.
    pub estimate: Option<Option<u32>>,
}

impl TaskDetailsUpdate {
    /// Returns whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.estimate.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    key: TaskKey,
    parent: Option<TaskKey>,
    sprints: BTreeSet<SprintId>,
    observers: BTreeSet<UserId>,
    task_type: TaskType,
    priority: Priority,
    status: TaskStatus,
    creator: UserId,
    assignee: Option<UserId>,
    summary: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    close_date: Option<DateTime<Utc>>,
    estimate: Option<u32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task key.
    pub key: TaskKey,
    /// Persisted parent link.
    pub parent: Option<TaskKey>,
    /// Sprints the task belongs to.
    pub sprints: BTreeSet<SprintId>,
    /// Users watching the task.
    pub observers: BTreeSet<UserId>,
    /// Persisted task type.
    pub task_type: TaskType,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Creator of the task.
    pub creator: UserId,
    /// Current assignee.
    pub assignee: Option<UserId>,
    /// Persisted summary.
    pub summary: String,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of the last close.
    pub close_date: Option<DateTime<Utc>>,
    /// Persisted estimate.
    pub estimate: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task under a freshly minted key.
    ///
    /// The task starts in [`TaskStatus::ToDo`] with no parent, no sprint
    /// memberships and no observers.
    #[must_use]
    pub fn create(key: TaskKey, new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            key,
            parent: None,
            sprints: BTreeSet::new(),
            observers: BTreeSet::new(),
            task_type: new_task.task_type,
            priority: new_task.priority,
            status: TaskStatus::ToDo,
            creator: new_task.creator,
            assignee: new_task.assignee,
            summary: new_task.summary,
            description: new_task.description,
            due_date: new_task.due_date,
            close_date: None,
            estimate: new_task.estimate,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            key: data.key,
            parent: data.parent,
            sprints: data.sprints,
            observers: data.observers,
            task_type: data.task_type,
            priority: data.priority,
            status: data.status,
            creator: data.creator,
            assignee: data.assignee,
            summary: data.summary,
            description: data.description,
            due_date: data.due_date,
            close_date: data.close_date,
            estimate: data.estimate,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task key.
    #[must_use]
    pub const fn key(&self) -> &TaskKey {
        &self.key
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        self.key.project_id()
    }

    /// Returns the parent task key, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&TaskKey> {
        self.parent.as_ref()
    }

    /// Returns the sprints this task belongs to.
    #[must_use]
    pub const fn sprints(&self) -> &BTreeSet<SprintId> {
        &self.sprints
    }

    /// Returns whether the task belongs to `sprint`.
    #[must_use]
    pub fn in_sprint(&self, sprint: SprintId) -> bool {
        self.sprints.contains(&sprint)
    }

    /// Returns the users watching this task.
    #[must_use]
    pub const fn observers(&self) -> &BTreeSet<UserId> {
        &self.observers
    }

    /// Returns whether `user` watches this task.
    #[must_use]
    pub fn is_watched_by(&self, user: &UserId) -> bool {
        self.observers.contains(user)
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserId> {
        self.assignee.as_ref()
    }

    /// Returns the summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns when the task was last closed, while it stays closed.
    #[must_use]
    pub const fn close_date(&self) -> Option<DateTime<Utc>> {
        self.close_date
    }

    /// Returns the estimate, if any.
    #[must_use]
    pub const fn estimate(&self) -> Option<u32> {
        self.estimate
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target` if the workflow permits it.
    ///
    /// Entering [`TaskStatus::Closed`] stamps `close_date`; leaving it
    /// clears the stamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncorrectTaskTransition`] when the move is
    /// not in the workflow table. The task is left unchanged.
    pub fn change_status(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::IncorrectTaskTransition {
                task: self.key.clone(),
                from: self.status,
                to: target,
            });
        }

        let timestamp = clock.utc();
        self.close_date = (target == TaskStatus::Closed).then_some(timestamp);
        self.status = target;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Links this task under `parent`, replacing any previous parent.
    ///
    /// Cycle detection across more than one level needs the ancestry of
    /// `parent` and is done by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfParent`],
    /// [`TaskDomainError::CrossProjectParent`] or
    /// [`TaskDomainError::IncorrectTaskRelationship`]; the task is left
    /// unchanged in every case.
    pub fn set_parent(&mut self, parent: &Self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if parent.key == self.key {
            return Err(TaskDomainError::SelfParent(self.key.clone()));
        }
        if parent.project_id() != self.project_id() {
            return Err(TaskDomainError::CrossProjectParent {
                task: self.key.clone(),
                parent: parent.key.clone(),
            });
        }
        if !can_nest(parent.task_type, self.task_type) {
            return Err(TaskDomainError::IncorrectTaskRelationship {
                task: self.key.clone(),
                parent: parent.key.clone(),
                parent_type: parent.task_type,
                child_type: self.task_type,
            });
        }

        self.parent = Some(parent.key.clone());
        self.touch(clock);
        Ok(())
    }

    /// Detaches the task from its parent. Does nothing when unparented.
    pub fn clear_parent(&mut self, clock: &impl Clock) {
        if self.parent.take().is_some() {
            self.touch(clock);
        }
    }

    /// Adds a sprint membership. Returns `false` when already present.
    ///
    /// Project and sprint-status rules are enforced by
    /// [`crate::sprint::services::SprintMembershipService`].
    pub fn join_sprint(&mut self, sprint: SprintId, clock: &impl Clock) -> bool {
        let inserted = self.sprints.insert(sprint);
        if inserted {
            self.touch(clock);
        }
        inserted
    }

    /// Removes a sprint membership. Returns `false` when it was absent.
    pub fn leave_sprint(&mut self, sprint: SprintId, clock: &impl Clock) -> bool {
        let removed = self.sprints.remove(&sprint);
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Drops a sprint membership without touching the edit timestamp.
    ///
    /// Used when the sprint itself is deleted.
    pub fn forget_sprint(&mut self, sprint: SprintId) {
        self.sprints.remove(&sprint);
    }

    /// Detaches the parent link without touching the edit timestamp.
    ///
    /// Used when the parent task itself is deleted.
    pub fn orphan(&mut self) {
        self.parent = None;
    }

    /// Starts watching the task. Returns `false` when `user` already was.
    pub fn watch(&mut self, user: UserId) -> bool {
        self.observers.insert(user)
    }

    /// Stops watching the task. Returns `false` when `user` was not.
    pub fn unwatch(&mut self, user: &UserId) -> bool {
        self.observers.remove(user)
    }

    /// Applies a partial update of the editable attributes.
    ///
    /// Returns `false`, without touching the edit timestamp, when the update
    /// is empty.
    pub fn update_details(&mut self, update: TaskDetailsUpdate, clock: &impl Clock) -> bool {
        if update.is_empty() {
            return false;
        }
        let TaskDetailsUpdate {
            summary,
            description,
            assignee,
            priority,
            due_date,
            estimate,
        } = update;

        if let Some(value) = summary {
            self.summary = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = assignee {
            self.assignee = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = estimate {
            self.estimate = value;
        }
        self.touch(clock);
        true
    }

    /// Updates the edit timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
