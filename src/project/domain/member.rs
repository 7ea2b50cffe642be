//! Project membership roles and role assignments.

use super::{ParseRoleError, ProjectId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission tier granted by a project membership.
///
/// Tiers are ranked `Viewer < Developer < Admin`; a membership satisfies a
/// requirement when its rank is at least the required rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Read-only access to the project.
    Viewer,
    /// May create and edit tasks, comments and sprint assignments.
    Developer,
    /// Full control, including membership management and deletion.
    Admin,
}

impl Role {
    /// All roles in ascending rank order.
    pub const ALL: [Self; 3] = [Self::Viewer, Self::Developer, Self::Admin];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Developer => "Developer",
            Self::Admin => "Admin",
        }
    }

    /// Returns the numeric rank used for authorization comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Viewer => 1,
            Self::Developer => 2,
            Self::Admin => 3,
        }
    }

    /// Returns whether this role meets the `minimum` tier.
    #[must_use]
    pub const fn satisfies(self, minimum: Self) -> bool {
        self.rank() >= minimum.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "viewer" => Ok(Self::Viewer),
            "developer" => Ok(Self::Developer),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// A single (project, user, role) grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectMember {
    project_id: ProjectId,
    user_id: UserId,
    role: Role,
}

impl ProjectMember {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(project_id: ProjectId, user_id: UserId, role: Role) -> Self {
        Self {
            project_id,
            user_id,
            role,
        }
    }

    /// Returns the project the grant applies to.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the granted role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
