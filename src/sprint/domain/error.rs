//! Error types for sprint domain validation and lifecycle changes.

use super::{SprintId, SprintStatus};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating sprints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name length is outside the accepted range.
    #[error("sprint name must be between 3 and 32 characters, got {actual}")]
    InvalidName {
        /// Character count of the rejected name.
        actual: usize,
    },

    /// The requested status change is not part of the sprint lifecycle.
    #[error("sprint {sprint_id}: cannot move sprint from '{from}' to '{to}'")]
    InvalidSprintStatusTransition {
        /// Sprint whose status change was rejected.
        sprint_id: SprintId,
        /// Status at the time of the request.
        from: SprintStatus,
        /// Requested status.
        to: SprintStatus,
    },
}

impl SprintDomainError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. } => ErrorKind::Validation,
            Self::InvalidSprintStatusTransition { .. } => ErrorKind::StateTransition,
        }
    }
}

/// Error returned while parsing sprint statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);
