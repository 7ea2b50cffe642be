//! Transactional unit-of-work port.

use super::StoreError;
use crate::{project::ports::ProjectStore, sprint::ports::SprintStore, task::ports::TaskStore};
use async_trait::async_trait;

/// Row-level access available inside a single store transaction.
///
/// Every method runs against the transaction's snapshot. Nothing becomes
/// visible to other callers until the surrounding
/// [`UnitOfWork::transact`] call commits.
pub trait StoreTransaction: ProjectStore + SprintStore + TaskStore {}

impl<T> StoreTransaction for T where T: ProjectStore + SprintStore + TaskStore + ?Sized {}

/// Atomic multi-row commit primitive.
///
/// `transact` runs `work` synchronously against a fresh transaction. When
/// `work` returns `Ok`, every write it made is committed together; when it
/// returns `Err`, or the store fails, all of them are rolled back and the
/// error is returned unchanged. Row locks taken through the transaction
/// (for example [`ProjectStore::lock_project`]) are held until commit or
/// rollback.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Runs `work` inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a [`StoreError`] converted
    /// into `E` when the transaction cannot be opened or committed.
    async fn transact<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static;
}
