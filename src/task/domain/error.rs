//! Error types for task domain validation and parsing.

use super::{TaskKey, TaskStatus, TaskType};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The status change is not part of the task workflow.
    #[error("task {task}: cannot move from '{from}' to '{to}'")]
    IncorrectTaskTransition {
        /// Task whose status change was rejected.
        task: TaskKey,
        /// Status at the time of the request.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The parent's type does not accept children of the task's type.
    #[error("task {task}: a {child_type} cannot be nested under {parent} ({parent_type})")]
    IncorrectTaskRelationship {
        /// Task that was to be re-parented.
        task: TaskKey,
        /// Rejected parent.
        parent: TaskKey,
        /// Type of the rejected parent.
        parent_type: TaskType,
        /// Type of the task.
        child_type: TaskType,
    },

    /// The candidate parent belongs to another project.
    #[error("task {task}: parent {parent} belongs to a different project")]
    CrossProjectParent {
        /// Task that was to be re-parented.
        task: TaskKey,
        /// Rejected parent.
        parent: TaskKey,
    },

    /// A task cannot be its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskKey),

    /// Linking the parent would close a loop in the hierarchy.
    #[error("task {task}: making {parent} its parent would create a cycle")]
    HierarchyCycle {
        /// Task that was to be re-parented.
        task: TaskKey,
        /// Rejected parent.
        parent: TaskKey,
    },

    /// The value is not a `{project}-{number}` task key.
    #[error("invalid task key '{0}', expected PROJECT-NUMBER")]
    InvalidTaskKey(String),

    /// A required text field is blank.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field exceeds its configured limit.
    #[error("{field} must be at most {max} characters, got {actual}")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Configured limit.
        max: usize,
        /// Character count of the rejected value.
        actual: usize,
    },
}

impl TaskDomainError {
    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IncorrectTaskTransition { .. }
            | Self::IncorrectTaskRelationship { .. }
            | Self::HierarchyCycle { .. } => ErrorKind::StateTransition,
            Self::CrossProjectParent { .. }
            | Self::SelfParent(_)
            | Self::InvalidTaskKey(_)
            | Self::EmptyField(_)
            | Self::FieldTooLong { .. } => ErrorKind::Validation,
        }
    }
}

/// Error returned while parsing task enumerations from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct ParseTaskFieldError {
    /// Which enumeration was being parsed.
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseTaskFieldError {
    /// Creates a parse error for `field`.
    #[must_use]
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}
