//! Sprint aggregate root and its lifecycle.

use super::{ParseSprintStatusError, SprintDomainError, SprintId, SprintName};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    /// Sprint exists but has not started.
    Created,
    /// Sprint is running.
    Started,
    /// Sprint has finished; its task set is frozen.
    Closed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Started => "Started",
            Self::Closed => "Closed",
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// The lifecycle only moves forward, one step at a time.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Created, Self::Started) | (Self::Started, Self::Closed)
        )
    }

    /// Returns whether tasks may join or leave a sprint in this status.
    #[must_use]
    pub const fn accepts_membership_changes(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "started" => Ok(Self::Started),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Sprint aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    name: SprintName,
    status: SprintStatus,
    start_date: Option<DateTime<Utc>>,
    close_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: SprintName,
    /// Persisted lifecycle status.
    pub status: SprintStatus,
    /// Timestamp of the start transition, if any.
    pub start_date: Option<DateTime<Utc>>,
    /// Timestamp of the close transition, if any.
    pub close_date: Option<DateTime<Utc>>,
}

impl Sprint {
    /// Creates a sprint in [`SprintStatus::Created`] with no dates set.
    #[must_use]
    pub fn new(project_id: ProjectId, name: SprintName) -> Self {
        Self {
            id: SprintId::new(),
            project_id,
            name,
            status: SprintStatus::Created,
            start_date: None,
            close_date: None,
        }
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            status: data.status,
            start_date: data.start_date,
            close_date: data.close_date,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub const fn name(&self) -> &SprintName {
        &self.name
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }

    /// Returns when the sprint was started.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns when the sprint was closed.
    #[must_use]
    pub const fn close_date(&self) -> Option<DateTime<Utc>> {
        self.close_date
    }

    /// Replaces the sprint name. Allowed in every status.
    pub fn rename(&mut self, name: SprintName) {
        self.name = name;
    }

    /// Starts a freshly created sprint.
    ///
    /// Stamps `start_date` with the current time and clears `close_date`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] unless
    /// the sprint is [`SprintStatus::Created`].
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.ensure_transition(SprintStatus::Started)?;
        self.status = SprintStatus::Started;
        self.start_date = Some(clock.utc());
        self.close_date = None;
        Ok(())
    }

    /// Closes a running sprint.
    ///
    /// Stamps `close_date`; `start_date` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] unless
    /// the sprint is [`SprintStatus::Started`].
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.ensure_transition(SprintStatus::Closed)?;
        self.status = SprintStatus::Closed;
        self.close_date = Some(clock.utc());
        Ok(())
    }

    /// Moves the sprint to `target` by dispatching to [`Self::start`] or
    /// [`Self::close`].
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintStatusTransition`] for any
    /// target other than a valid next step, including
    /// [`SprintStatus::Created`].
    pub fn change_status(
        &mut self,
        target: SprintStatus,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        match target {
            SprintStatus::Started => self.start(clock),
            SprintStatus::Closed => self.close(clock),
            SprintStatus::Created => Err(self.transition_error(target)),
        }
    }

    fn ensure_transition(&self, target: SprintStatus) -> Result<(), SprintDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(self.transition_error(target))
        }
    }

    const fn transition_error(&self, target: SprintStatus) -> SprintDomainError {
        SprintDomainError::InvalidSprintStatusTransition {
            sprint_id: self.id,
            from: self.status,
            to: target,
        }
    }
}
