//! Service layer for sprint creation and lifecycle.

use crate::error::ErrorKind;
use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintDomainError, SprintId, SprintName, SprintStatus};
use crate::store::ports::{StoreError, UnitOfWork};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Service-level errors for sprint lifecycle operations.
#[derive(Debug, Error)]
pub enum SprintServiceError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
}

impl SprintServiceError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::ProjectNotFound(_) | Self::SprintNotFound(_) => ErrorKind::Precondition,
        }
    }
}

/// Result type for sprint lifecycle operations.
pub type SprintServiceResult<T> = Result<T, SprintServiceError>;

/// Sprint lifecycle orchestration service.
#[derive(Clone)]
pub struct SprintService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SprintService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new sprint lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a sprint in [`SprintStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::Domain`] for an invalid name and
    /// [`SprintServiceError::ProjectNotFound`] when the project is missing.
    #[instrument(skip_all, fields(project = %project))]
    pub async fn create_sprint(
        &self,
        project: &ProjectId,
        name: impl Into<String>,
    ) -> SprintServiceResult<Sprint> {
        let sprint = Sprint::new(project.clone(), SprintName::new(name)?);
        let created = self
            .store
            .transact(move |tx| -> SprintServiceResult<Sprint> {
                if tx.find_project(sprint.project_id())?.is_none() {
                    return Err(SprintServiceError::ProjectNotFound(
                        sprint.project_id().clone(),
                    ));
                }
                tx.insert_sprint(&sprint)?;
                Ok(sprint)
            })
            .await?;
        info!(sprint = %created.id(), "sprint created");
        Ok(created)
    }

    /// Reads a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::Store`] when the lookup fails.
    pub async fn find_sprint(&self, id: SprintId) -> SprintServiceResult<Option<Sprint>> {
        self.store
            .transact(move |tx| -> SprintServiceResult<Option<Sprint>> {
                Ok(tx.find_sprint(id)?)
            })
            .await
    }

    /// Lists the sprints of a project ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::ProjectNotFound`] when the project is
    /// missing.
    pub async fn sprints_of(&self, project: &ProjectId) -> SprintServiceResult<Vec<Sprint>> {
        let project_id = project.clone();
        self.store
            .transact(move |tx| -> SprintServiceResult<Vec<Sprint>> {
                if tx.find_project(&project_id)?.is_none() {
                    return Err(SprintServiceError::ProjectNotFound(project_id));
                }
                Ok(tx.sprints_of(&project_id)?)
            })
            .await
    }

    /// Renames a sprint in any status.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::Domain`] for an invalid name and
    /// [`SprintServiceError::SprintNotFound`] when the sprint is missing.
    #[instrument(skip_all, fields(sprint = %id))]
    pub async fn rename_sprint(
        &self,
        id: SprintId,
        name: impl Into<String>,
    ) -> SprintServiceResult<Sprint> {
        let new_name = SprintName::new(name)?;
        self.apply(id, move |sprint, _| {
            sprint.rename(new_name);
            Ok(())
        })
        .await
    }

    /// Deletes a sprint. Tasks lose their membership but are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::SprintNotFound`] when the sprint is
    /// missing.
    #[instrument(skip_all, fields(sprint = %id))]
    pub async fn delete_sprint(&self, id: SprintId) -> SprintServiceResult<()> {
        self.store
            .transact(move |tx| -> SprintServiceResult<()> {
                if tx.delete_sprint(id)? {
                    Ok(())
                } else {
                    Err(SprintServiceError::SprintNotFound(id))
                }
            })
            .await?;
        info!("sprint deleted");
        Ok(())
    }

    /// Starts a sprint that is still [`SprintStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] (wrapped
    /// in [`SprintServiceError::Domain`]) from any other status.
    #[instrument(skip_all, fields(sprint = %id))]
    pub async fn start_sprint(&self, id: SprintId) -> SprintServiceResult<Sprint> {
        self.transition(id, SprintStatus::Started).await
    }

    /// Closes a sprint that is [`SprintStatus::Started`].
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] (wrapped
    /// in [`SprintServiceError::Domain`]) from any other status.
    #[instrument(skip_all, fields(sprint = %id))]
    pub async fn close_sprint(&self, id: SprintId) -> SprintServiceResult<Sprint> {
        self.transition(id, SprintStatus::Closed).await
    }

    /// Moves a sprint to `target`, dispatching to start or close.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] (wrapped
    /// in [`SprintServiceError::Domain`]) for any target that is not the
    /// next lifecycle step.
    #[instrument(skip_all, fields(sprint = %id, target = %target))]
    pub async fn change_status(
        &self,
        id: SprintId,
        target: SprintStatus,
    ) -> SprintServiceResult<Sprint> {
        self.transition(id, target).await
    }

    async fn transition(&self, id: SprintId, target: SprintStatus) -> SprintServiceResult<Sprint> {
        let updated = self
            .apply(id, move |sprint, clock| sprint.change_status(target, clock))
            .await
            .inspect_err(|err| warn!(error = %err, "sprint transition rejected"))?;
        info!(status = %updated.status(), "sprint status changed");
        Ok(updated)
    }

    /// Locks a sprint, applies `change` and persists the result.
    async fn apply<F>(&self, id: SprintId, change: F) -> SprintServiceResult<Sprint>
    where
        F: FnOnce(&mut Sprint, &C) -> Result<(), SprintDomainError> + Send + 'static,
    {
        let clock = Arc::clone(&self.clock);
        self.store
            .transact(move |tx| -> SprintServiceResult<Sprint> {
                let mut sprint = tx
                    .lock_sprint(id)?
                    .ok_or(SprintServiceError::SprintNotFound(id))?;
                change(&mut sprint, &*clock)?;
                tx.update_sprint(&sprint)?;
                Ok(sprint)
            })
            .await
    }
}
