//! Domain model for sprints.
//!
//! A sprint belongs to one project and moves strictly forward through
//! `Created -> Started -> Closed`. Once closed its task set is frozen.

mod error;
mod ids;
mod sprint;

pub use error::{ParseSprintStatusError, SprintDomainError};
pub use ids::{SprintId, SprintName};
pub use sprint::{PersistedSprintData, Sprint, SprintStatus};
