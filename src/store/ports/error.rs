//! Errors reported by store adapters.

use crate::error::ErrorKind;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A row with the same key already exists.
    #[error("duplicate {entity}: {key}")]
    Duplicate {
        /// Kind of row that collided.
        entity: &'static str,
        /// Display form of the colliding key.
        key: String,
    },

    /// A row expected by an update does not exist.
    #[error("{entity} not found: {key}")]
    Missing {
        /// Kind of row that was expected.
        entity: &'static str,
        /// Display form of the missing key.
        key: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Builds a duplicate-key error.
    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }

    /// Builds a missing-row error.
    pub fn missing(entity: &'static str, key: impl ToString) -> Self {
        Self::Missing {
            entity,
            key: key.to_string(),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the error category reported to API callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Duplicate { .. } => ErrorKind::Validation,
            Self::Missing { .. } => ErrorKind::Precondition,
            Self::Persistence(_) => ErrorKind::Store,
        }
    }
}
