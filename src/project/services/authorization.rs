//! Role-based permission checks.

use crate::error::ErrorKind;
use crate::project::{
    domain::{ProjectId, Role, UserId},
    ports::MembershipDirectory,
};
use crate::store::ports::StoreError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Project-scoped operations exposed by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectOperation {
    /// Read the project itself.
    ViewProject,
    /// List the project members.
    ViewMembers,
    /// Read tasks, their children, observers and comments.
    ViewTasks,
    /// Read sprints.
    ViewSprints,
    /// Create a task.
    CreateTask,
    /// Edit task details or watch a task.
    EditTask,
    /// Change a task's workflow status.
    ChangeTaskStatus,
    /// Set or clear a task's parent.
    ChangeTaskParent,
    /// Add a task to a sprint or remove it.
    ChangeSprintMembership,
    /// Add or edit a comment.
    Comment,
    /// Delete a task.
    DeleteTask,
    /// Delete a comment.
    DeleteComment,
    /// Rename the project.
    EditProject,
    /// Delete the project.
    DeleteProject,
    /// Add, change or remove members.
    ManageMembers,
    /// Create, rename, delete, start or close sprints.
    ManageSprints,
}

impl ProjectOperation {
    /// Returns the lowest role allowed to perform the operation.
    #[must_use]
    pub const fn minimum_role(self) -> Role {
        match self {
            Self::ViewProject | Self::ViewMembers | Self::ViewTasks | Self::ViewSprints => {
                Role::Viewer
            }
            Self::CreateTask
            | Self::EditTask
            | Self::ChangeTaskStatus
            | Self::ChangeTaskParent
            | Self::ChangeSprintMembership
            | Self::Comment => Role::Developer,
            Self::DeleteTask
            | Self::DeleteComment
            | Self::EditProject
            | Self::DeleteProject
            | Self::ManageMembers
            | Self::ManageSprints => Role::Admin,
        }
    }
}

/// Errors returned by [`AuthorizationEvaluator::require`].
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The user holds no role, or a role below the requirement.
    #[error("user {user} lacks {required} access to project {project}")]
    PermissionDenied {
        /// User that was refused.
        user: UserId,
        /// Project the check was made against.
        project: ProjectId,
        /// Minimum role that was required.
        required: Role,
    },
    /// Membership lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthorizationError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied { .. } => ErrorKind::Precondition,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Decides whether a user may act on a project.
#[derive(Clone)]
pub struct AuthorizationEvaluator<D>
where
    D: MembershipDirectory,
{
    directory: Arc<D>,
}

impl<D> AuthorizationEvaluator<D>
where
    D: MembershipDirectory,
{
    /// Creates an evaluator backed by `directory`.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Returns whether `user` holds at least `minimum` in `project`.
    ///
    /// A lookup failure denies access.
    pub async fn permit(&self, user: &UserId, project: &ProjectId, minimum: Role) -> bool {
        match self.directory.role_of(project, user).await {
            Ok(role) => {
                let allowed = role.is_some_and(|held| held.satisfies(minimum));
                debug!(%user, %project, %minimum, allowed, "permission checked");
                allowed
            }
            Err(err) => {
                warn!(%user, %project, %minimum, error = %err, "membership lookup failed; denying");
                false
            }
        }
    }

    /// Returns whether `user` may perform `operation` in `project`.
    pub async fn permit_operation(
        &self,
        user: &UserId,
        project: &ProjectId,
        operation: ProjectOperation,
    ) -> bool {
        self.permit(user, project, operation.minimum_role()).await
    }

    /// Checks that `user` holds at least `minimum` in `project`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::PermissionDenied`] when the user's role
    /// is missing or too low, and [`AuthorizationError::Store`] when the
    /// lookup fails.
    pub async fn require(
        &self,
        user: &UserId,
        project: &ProjectId,
        minimum: Role,
    ) -> Result<(), AuthorizationError> {
        let role = self.directory.role_of(project, user).await?;
        if role.is_some_and(|held| held.satisfies(minimum)) {
            return Ok(());
        }
        warn!(%user, %project, %minimum, "permission denied");
        Err(AuthorizationError::PermissionDenied {
            user: user.clone(),
            project: project.clone(),
            required: minimum,
        })
    }
}
