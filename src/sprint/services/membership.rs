//! Recursive sprint membership for task subtrees.
//!
//! Adding a task to a sprint adds every descendant too; removing it removes
//! the whole subtree. The subtree is read completely, and every rule is
//! checked, before the first task is written. All writes of one call commit
//! together.

use crate::config::TrackerConfig;
use crate::error::ErrorKind;
use crate::sprint::domain::{Sprint, SprintId};
use crate::store::ports::{StoreError, StoreTransaction, UnitOfWork};
use crate::task::domain::{Task, TaskKey};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Errors returned by sprint membership operations.
#[derive(Debug, Error)]
pub enum SprintMembershipError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskKey),
    /// The sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
    /// The task and the sprint belong to different projects.
    #[error("task {task} and sprint {sprint} belong to different projects")]
    ProjectMismatch {
        /// Task that was to be added.
        task: TaskKey,
        /// Target sprint.
        sprint: SprintId,
    },
    /// Closed sprints neither gain nor lose tasks.
    #[error("sprint {0} is closed")]
    SprintClosed(SprintId),
    /// The task is not a member of the sprint.
    #[error("task {task} is not in sprint {sprint}")]
    NotInSprint {
        /// Task that was to be removed.
        task: TaskKey,
        /// Target sprint.
        sprint: SprintId,
    },
    /// The parent still holds the sprint, which would be re-propagated.
    #[error("task {task}: remove sprint {sprint} from parent {parent} instead")]
    ParentStillInSprint {
        /// Task that was to be removed.
        task: TaskKey,
        /// Parent that is still a member.
        parent: TaskKey,
        /// Target sprint.
        sprint: SprintId,
    },
    /// The stored hierarchy below the task loops back to it.
    #[error("hierarchy below task {0} contains a cycle")]
    CyclicHierarchy(TaskKey),
    /// The subtree exceeds the configured cascade limit.
    #[error("task {task} has {size} descendants, more than the limit of {max}")]
    SubtreeTooLarge {
        /// Root of the subtree.
        task: TaskKey,
        /// Number of descendants found.
        size: usize,
        /// Configured limit.
        max: usize,
    },
}

impl SprintMembershipError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(err) => err.kind(),
            Self::TaskNotFound(_) | Self::SprintNotFound(_) => ErrorKind::Precondition,
            Self::ProjectMismatch { .. }
            | Self::SprintClosed(_)
            | Self::NotInSprint { .. }
            | Self::ParentStillInSprint { .. }
            | Self::CyclicHierarchy(_)
            | Self::SubtreeTooLarge { .. } => ErrorKind::Validation,
        }
    }
}

/// Result type for sprint membership operations.
pub type SprintMembershipResult<T> = Result<T, SprintMembershipError>;

/// Adds and removes task subtrees to and from sprints.
#[derive(Clone)]
pub struct SprintMembershipService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
    max_subtree_size: usize,
}

impl<S, C> SprintMembershipService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new membership service with the default cascade limit.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            max_subtree_size: TrackerConfig::default().max_subtree_size,
        }
    }

    /// Applies the cascade limit from `config`.
    #[must_use]
    pub const fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.max_subtree_size = config.max_subtree_size;
        self
    }

    /// Adds a task and all its descendants to a sprint.
    ///
    /// Descendants already in the sprint are left alone. Returns the keys of
    /// the tasks that gained the membership, root first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintMembershipError::ProjectMismatch`] when the task and
    /// sprint belong to different projects,
    /// [`SprintMembershipError::SprintClosed`] when the sprint is closed, and
    /// the not-found or hierarchy errors when lookups fail. Nothing is
    /// written on error.
    #[instrument(skip_all, fields(task = %key, sprint = %sprint))]
    pub async fn add_task_to_sprint(
        &self,
        key: &TaskKey,
        sprint: SprintId,
    ) -> SprintMembershipResult<Vec<TaskKey>> {
        let task_key = key.clone();
        let clock = Arc::clone(&self.clock);
        let max = self.max_subtree_size;
        let changed = self
            .store
            .transact(move |tx| -> SprintMembershipResult<Vec<TaskKey>> {
                let task = lock_task(tx, &task_key)?;
                let target = lock_sprint(tx, sprint)?;
                if task.project_id() != target.project_id() {
                    return Err(SprintMembershipError::ProjectMismatch {
                        task: task_key,
                        sprint,
                    });
                }
                ensure_open(&target)?;

                let mut changed = Vec::new();
                for mut member in collect_subtree(tx, task, max)? {
                    if member.join_sprint(sprint, &*clock) {
                        tx.update_task(&member)?;
                        changed.push(member.key().clone());
                    }
                }
                Ok(changed)
            })
            .await
            .inspect_err(|err| warn!(error = %err, "sprint assignment rejected"))?;
        info!(changed = changed.len(), "task subtree added to sprint");
        Ok(changed)
    }

    /// Removes a task and all its descendants from a sprint.
    ///
    /// Descendants not in the sprint are left alone. Returns the keys of the
    /// tasks that lost the membership, root first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintMembershipError::NotInSprint`] when the task is not a
    /// member, [`SprintMembershipError::SprintClosed`] when the sprint is
    /// closed, [`SprintMembershipError::ParentStillInSprint`] when the
    /// task's parent is still a member, and the not-found or hierarchy
    /// errors when lookups fail. Nothing is written on error.
    #[instrument(skip_all, fields(task = %key, sprint = %sprint))]
    pub async fn remove_task_from_sprint(
        &self,
        key: &TaskKey,
        sprint: SprintId,
    ) -> SprintMembershipResult<Vec<TaskKey>> {
        let task_key = key.clone();
        let clock = Arc::clone(&self.clock);
        let max = self.max_subtree_size;
        let changed = self
            .store
            .transact(move |tx| -> SprintMembershipResult<Vec<TaskKey>> {
                let task = lock_task(tx, &task_key)?;
                let target = lock_sprint(tx, sprint)?;
                if !task.in_sprint(sprint) {
                    return Err(SprintMembershipError::NotInSprint {
                        task: task_key,
                        sprint,
                    });
                }
                ensure_open(&target)?;
                if let Some(parent_key) = task.parent() {
                    if load_task(tx, parent_key)?.in_sprint(sprint) {
                        return Err(SprintMembershipError::ParentStillInSprint {
                            task: task_key,
                            parent: parent_key.clone(),
                            sprint,
                        });
                    }
                }

                let mut changed = Vec::new();
                for mut member in collect_subtree(tx, task, max)? {
                    if member.leave_sprint(sprint, &*clock) {
                        tx.update_task(&member)?;
                        changed.push(member.key().clone());
                    }
                }
                Ok(changed)
            })
            .await
            .inspect_err(|err| warn!(error = %err, "sprint removal rejected"))?;
        info!(changed = changed.len(), "task subtree removed from sprint");
        Ok(changed)
    }
}

fn load_task(tx: &mut dyn StoreTransaction, key: &TaskKey) -> SprintMembershipResult<Task> {
    tx.find_task(key)?
        .ok_or_else(|| SprintMembershipError::TaskNotFound(key.clone()))
}

fn lock_task(tx: &mut dyn StoreTransaction, key: &TaskKey) -> SprintMembershipResult<Task> {
    tx.lock_task(key)?
        .ok_or_else(|| SprintMembershipError::TaskNotFound(key.clone()))
}

fn lock_sprint(tx: &mut dyn StoreTransaction, id: SprintId) -> SprintMembershipResult<Sprint> {
    tx.lock_sprint(id)?
        .ok_or(SprintMembershipError::SprintNotFound(id))
}

const fn ensure_open(sprint: &Sprint) -> SprintMembershipResult<()> {
    if sprint.status().accepts_membership_changes() {
        Ok(())
    } else {
        Err(SprintMembershipError::SprintClosed(sprint.id()))
    }
}

/// Returns `root` followed by all its descendants.
fn collect_subtree(
    tx: &mut dyn StoreTransaction,
    root: Task,
    max: usize,
) -> SprintMembershipResult<Vec<Task>> {
    let descendants = tx.descendants_of(root.key())?;
    if descendants.iter().any(|task| task.key() == root.key()) {
        return Err(SprintMembershipError::CyclicHierarchy(root.key().clone()));
    }
    if descendants.len() > max {
        return Err(SprintMembershipError::SubtreeTooLarge {
            task: root.key().clone(),
            size: descendants.len(),
            max,
        });
    }
    let mut subtree = Vec::with_capacity(descendants.len() + 1);
    subtree.push(root);
    subtree.extend(descendants);
    Ok(subtree)
}
