//! Application services for sprints.

mod lifecycle;
mod membership;

pub use lifecycle::{SprintService, SprintServiceError, SprintServiceResult};
pub use membership::{SprintMembershipError, SprintMembershipResult, SprintMembershipService};
