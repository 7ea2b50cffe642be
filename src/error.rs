//! Error categories shared by every bounded context.
//!
//! Each context defines its own `thiserror` enums; this module only provides
//! the coarse classification the API layer uses to pick a response.

use serde::Serialize;
use std::fmt;

/// Coarse category of a domain or service failure.
///
/// None of these are fatal to the process. Every failure is scoped to a
/// single request and leaves persisted state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or cross-entity-inconsistent input.
    Validation,
    /// A requested status or relationship change is not permitted.
    StateTransition,
    /// A required entity, project or permission is missing.
    Precondition,
    /// The backing store failed.
    Store,
}

impl ErrorKind {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::StateTransition => "state_transition",
            Self::Precondition => "precondition",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
