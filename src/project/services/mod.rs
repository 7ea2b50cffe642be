//! Application services for projects, memberships and authorization.

mod authorization;
mod project;

pub use authorization::{AuthorizationError, AuthorizationEvaluator, ProjectOperation};
pub use project::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
};
