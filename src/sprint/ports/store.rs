//! Row operations on sprints inside a store transaction.

use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintId};
use crate::store::ports::StoreResult;

/// Sprint persistence contract.
pub trait SprintStore {
    /// Inserts a new sprint row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the owning
    /// project does not exist, or a duplicate error on identifier clashes.
    fn insert_sprint(&mut self, sprint: &Sprint) -> StoreResult<()>;

    /// Reads a sprint without locking it.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn find_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>>;

    /// Reads a sprint and takes an exclusive lock on its row, so its status
    /// cannot change until the transaction ends.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read or the lock fails.
    fn lock_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>>;

    /// Persists the name, status and dates of an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the sprint
    /// does not exist.
    fn update_sprint(&mut self, sprint: &Sprint) -> StoreResult<()>;

    /// Deletes a sprint and every task membership that refers to it.
    /// Returns `false` when the sprint did not exist.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_sprint(&mut self, id: SprintId) -> StoreResult<bool>;

    /// Lists the sprints of `project`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn sprints_of(&mut self, project: &ProjectId) -> StoreResult<Vec<Sprint>>;
}
