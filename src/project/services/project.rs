//! Service layer for projects and project memberships.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectMember, ProjectName, Role, UserId},
    ports::MembershipDirectory,
};
use crate::store::ports::{StoreError, UnitOfWork};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    id: String,
    name: String,
    creator: UserId,
}

impl CreateProjectRequest {
    /// Creates a request; `creator` becomes the first Admin of the project.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, creator: UserId) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            creator,
        }
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// A project with the same identifier already exists.
    #[error("project already exists: {0}")]
    ProjectAlreadyExists(ProjectId),
}

impl ProjectServiceError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::ProjectNotFound(_) => ErrorKind::Precondition,
            Self::ProjectAlreadyExists(_) => ErrorKind::Validation,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project and membership orchestration service.
///
/// Also serves as the [`MembershipDirectory`] consulted by
/// [`super::AuthorizationEvaluator`].
#[derive(Clone)]
pub struct ProjectService<S>
where
    S: UnitOfWork,
{
    store: Arc<S>,
}

impl<S> ProjectService<S>
where
    S: UnitOfWork,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a project and grants its creator the Admin role in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for a malformed identifier or
    /// name, and [`ProjectServiceError::ProjectAlreadyExists`] when the
    /// identifier is taken.
    #[instrument(skip_all, fields(project = %request.id, creator = %request.creator))]
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let id = ProjectId::new(request.id)?;
        let name = ProjectName::new(request.name)?;
        let project = Project::new(id.clone(), name);
        let admin = ProjectMember::new(id.clone(), request.creator, Role::Admin);

        let created = self
            .store
            .transact(move |tx| -> ProjectServiceResult<Project> {
                tx.insert_project(&project).map_err(|err| match err {
                    StoreError::Duplicate { .. } => {
                        ProjectServiceError::ProjectAlreadyExists(project.id().clone())
                    }
                    other => other.into(),
                })?;
                tx.upsert_member(&admin)?;
                Ok(project)
            })
            .await?;
        info!(project = %id, "project created");
        Ok(created)
    }

    /// Reads a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the lookup fails.
    #[instrument(skip_all, fields(project = %id))]
    pub async fn find_project(&self, id: &ProjectId) -> ProjectServiceResult<Option<Project>> {
        let target = id.clone();
        self.store
            .transact(move |tx| -> ProjectServiceResult<Option<Project>> {
                Ok(tx.find_project(&target)?)
            })
            .await
    }

    /// Renames a project. The identifier never changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for an invalid name and
    /// [`ProjectServiceError::ProjectNotFound`] when the project is missing.
    #[instrument(skip_all, fields(project = %id))]
    pub async fn rename_project(
        &self,
        id: &ProjectId,
        name: impl Into<String>,
    ) -> ProjectServiceResult<Project> {
        let new_name = ProjectName::new(name)?;
        let target = id.clone();
        self.store
            .transact(move |tx| -> ProjectServiceResult<Project> {
                let mut project = tx
                    .lock_project(&target)?
                    .ok_or_else(|| ProjectServiceError::ProjectNotFound(target.clone()))?;
                project.rename(new_name);
                tx.update_project(&project)?;
                Ok(project)
            })
            .await
    }

    /// Deletes a project together with its members, sprints, tasks and
    /// comments.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] when the project is
    /// missing.
    #[instrument(skip_all, fields(project = %id))]
    pub async fn delete_project(&self, id: &ProjectId) -> ProjectServiceResult<()> {
        let target = id.clone();
        self.store
            .transact(move |tx| -> ProjectServiceResult<()> {
                if tx.delete_project(&target)? {
                    Ok(())
                } else {
                    Err(ProjectServiceError::ProjectNotFound(target))
                }
            })
            .await?;
        info!(project = %id, "project deleted");
        Ok(())
    }

    /// Grants `role` to `user`, replacing any role they already hold.
    ///
    /// Calling this twice with the same arguments leaves one membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] when the project is
    /// missing.
    #[instrument(skip_all, fields(project = %project, user = %user, role = %role))]
    pub async fn add_member(
        &self,
        project: &ProjectId,
        user: UserId,
        role: Role,
    ) -> ProjectServiceResult<ProjectMember> {
        let member = ProjectMember::new(project.clone(), user, role);
        let saved = self
            .store
            .transact(move |tx| -> ProjectServiceResult<ProjectMember> {
                if tx.find_project(member.project_id())?.is_none() {
                    return Err(ProjectServiceError::ProjectNotFound(
                        member.project_id().clone(),
                    ));
                }
                tx.upsert_member(&member)?;
                Ok(member)
            })
            .await?;
        info!("member role set");
        Ok(saved)
    }

    /// Revokes the membership of `user`. Returns `false` when there was none.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the delete fails.
    #[instrument(skip_all, fields(project = %project, user = %user))]
    pub async fn remove_member(
        &self,
        project: &ProjectId,
        user: &UserId,
    ) -> ProjectServiceResult<bool> {
        let (project_id, user_id) = (project.clone(), user.clone());
        let removed = self
            .store
            .transact(move |tx| -> ProjectServiceResult<bool> {
                Ok(tx.delete_member(&project_id, &user_id)?)
            })
            .await?;
        if removed {
            info!("member removed");
        } else {
            debug!("no membership to remove");
        }
        Ok(removed)
    }

    /// Returns the role `user` holds in `project`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the lookup fails.
    pub async fn role_of(
        &self,
        project: &ProjectId,
        user: &UserId,
    ) -> ProjectServiceResult<Option<Role>> {
        Ok(MembershipDirectory::role_of(self, project, user).await?)
    }

    /// Lists the members of `project` ordered by user, optionally only
    /// those holding `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] when the project is
    /// missing.
    #[instrument(skip_all, fields(project = %project))]
    pub async fn list_members(
        &self,
        project: &ProjectId,
        role: Option<Role>,
    ) -> ProjectServiceResult<Vec<ProjectMember>> {
        let project_id = project.clone();
        self.store
            .transact(move |tx| -> ProjectServiceResult<Vec<ProjectMember>> {
                if tx.find_project(&project_id)?.is_none() {
                    return Err(ProjectServiceError::ProjectNotFound(project_id));
                }
                let mut members = tx.members_of(&project_id)?;
                if let Some(wanted) = role {
                    members.retain(|member| member.role() == wanted);
                }
                Ok(members)
            })
            .await
    }
}

#[async_trait]
impl<S> MembershipDirectory for ProjectService<S>
where
    S: UnitOfWork,
{
    async fn role_of(&self, project: &ProjectId, user: &UserId) -> Result<Option<Role>, StoreError> {
        let (project_id, user_id) = (project.clone(), user.clone());
        self.store
            .transact(move |tx| -> Result<Option<Role>, StoreError> {
                Ok(tx.find_member(&project_id, &user_id)?.map(|member| member.role()))
            })
            .await
    }
}
