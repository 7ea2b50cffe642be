//! Domain model for projects, memberships and task numbering.
//!
//! Projects scope every other entity. They own the monotonically increasing
//! task counter and the role assignments consumed by authorization.

mod error;
mod ids;
mod member;
mod project;

pub use error::{ParseRoleError, ProjectDomainError};
pub use ids::{ProjectId, ProjectName, UserId};
pub use member::{ProjectMember, Role};
pub use project::{PersistedProjectData, Project, TaskNumber};
