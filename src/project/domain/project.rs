//! Project aggregate root and the per-project task number sequence.

use super::{ProjectDomainError, ProjectId, ProjectName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project-scoped sequence number of a task (`7` in `TTP-7`).
///
/// Numbers start at one and are never reused within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNumber(u64);

impl TaskNumber {
    /// Wraps a persisted task number.
    ///
    /// Returns `None` for zero, which is never minted.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project aggregate root.
///
/// The project owns the `last_task_index` counter from which task numbers
/// are minted. Callers must hold the project's exclusive row lock between
/// reading the project and persisting the incremented counter; see
/// [`crate::project::ports::ProjectStore::lock_project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    last_task_index: u64,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted display name.
    pub name: ProjectName,
    /// Persisted counter of the last minted task number.
    pub last_task_index: u64,
}

impl Project {
    /// Creates a new project with an untouched task counter.
    #[must_use]
    pub const fn new(id: ProjectId, name: ProjectName) -> Self {
        Self {
            id,
            name,
            last_task_index: 0,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            last_task_index: data.last_task_index,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the number of the most recently minted task, or zero.
    #[must_use]
    pub const fn last_task_index(&self) -> u64 {
        self.last_task_index
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: ProjectName) {
        self.name = name;
    }

    /// Advances the counter and returns the freshly minted task number.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::TaskIndexExhausted`] when the counter
    /// cannot be incremented without overflowing.
    pub fn mint_task_number(&mut self) -> Result<TaskNumber, ProjectDomainError> {
        let next = self
            .last_task_index
            .checked_add(1)
            .ok_or_else(|| ProjectDomainError::TaskIndexExhausted(self.id.clone()))?;
        self.last_task_index = next;
        Ok(TaskNumber(next))
    }
}
