//! Row operations on projects and memberships inside a store transaction.

use crate::project::domain::{Project, ProjectId, ProjectMember, UserId};
use crate::store::ports::StoreResult;

/// Project and membership persistence contract.
pub trait ProjectStore {
    /// Inserts a new project row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Duplicate`] when the
    /// identifier is already taken.
    fn insert_project(&mut self, project: &Project) -> StoreResult<()>;

    /// Reads a project without locking it.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn find_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>>;

    /// Reads a project and takes an exclusive lock on its row.
    ///
    /// The lock is held until the transaction ends and serializes every
    /// writer of `last_task_index`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read or the lock fails.
    fn lock_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>>;

    /// Persists the name and task counter of an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the project
    /// does not exist.
    fn update_project(&mut self, project: &Project) -> StoreResult<()>;

    /// Deletes a project together with its members, sprints, tasks and
    /// comments. Returns `false` when the project did not exist.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_project(&mut self, id: &ProjectId) -> StoreResult<bool>;

    /// Reads the membership of `user` in `project`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn find_member(
        &mut self,
        project: &ProjectId,
        user: &UserId,
    ) -> StoreResult<Option<ProjectMember>>;

    /// Inserts the membership, or overwrites the role of the existing row
    /// for the same (project, user) pair.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write fails.
    fn upsert_member(&mut self, member: &ProjectMember) -> StoreResult<()>;

    /// Deletes the membership of `user` in `project`. Returns `false` when
    /// there was none.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_member(&mut self, project: &ProjectId, user: &UserId) -> StoreResult<bool>;

    /// Lists every membership of `project`, ordered by user identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn members_of(&mut self, project: &ProjectId) -> StoreResult<Vec<ProjectMember>>;
}
