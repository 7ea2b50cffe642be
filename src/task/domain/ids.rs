//! Identifier types for the task domain.

use super::TaskDomainError;
use crate::project::domain::{ProjectId, TaskNumber};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Human-readable task identifier in `{project_id}-{number}` form, such as
/// `TTP-12`.
///
/// The key is minted once, when the task is created, and never changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey {
    project_id: ProjectId,
    number: TaskNumber,
}

impl TaskKey {
    /// Builds a key from its parts.
    #[must_use]
    pub const fn new(project_id: ProjectId, number: TaskNumber) -> Self {
        Self { project_id, number }
    }

    /// Returns the project the task belongs to.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the project-scoped sequence number.
    #[must_use]
    pub const fn number(&self) -> TaskNumber {
        self.number
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_id, self.number)
    }
}

impl FromStr for TaskKey {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TaskDomainError::InvalidTaskKey(value.to_owned());
        let (project, number) = value.trim().split_once('-').ok_or_else(invalid)?;
        let project_id = ProjectId::new(project).map_err(|_| invalid())?;
        let number = number
            .parse::<u64>()
            .ok()
            .and_then(TaskNumber::new)
            .ok_or_else(invalid)?;
        Ok(Self::new(project_id, number))
    }
}

impl Serialize for TaskKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Unique identifier of a task comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Creates a new random comment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a comment identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
