//! Read-side membership lookup consumed by authorization.

use crate::project::domain::{ProjectId, Role, UserId};
use crate::store::ports::StoreError;
use async_trait::async_trait;

/// Per-project role lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Returns the role `user` holds in `project`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the lookup fails.
    async fn role_of(&self, project: &ProjectId, user: &UserId) -> Result<Option<Role>, StoreError>;
}
