//! Error types for project domain validation and parsing.

use super::ProjectId;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project identifier is not exactly three ASCII letters or digits.
    #[error("invalid project identifier '{0}', expected three ASCII letters or digits")]
    InvalidProjectId(String),

    /// The project name length is outside the accepted range.
    #[error("project name must be between 3 and 25 characters, got {actual}")]
    InvalidProjectName {
        /// Character count of the rejected name.
        actual: usize,
    },

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier does not fit the stored column.
    #[error("user identifier must be at most {max} characters, got {actual}")]
    UserIdTooLong {
        /// Accepted maximum.
        max: usize,
        /// Character count of the rejected identifier.
        actual: usize,
    },

    /// The task counter cannot be incremented any further.
    #[error("task numbering for project {0} is exhausted")]
    TaskIndexExhausted(ProjectId),
}

impl ProjectDomainError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskIndexExhausted(_) => ErrorKind::Precondition,
            Self::InvalidProjectId(_)
            | Self::InvalidProjectName { .. }
            | Self::EmptyUserId
            | Self::UserIdTooLong { .. } => ErrorKind::Validation,
        }
    }
}

/// Error returned while parsing membership roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project role: {0}")]
pub struct ParseRoleError(pub String);
