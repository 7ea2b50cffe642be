//! Port contracts for transactional persistence.
//!
//! Each bounded context declares the row operations it needs (`ProjectStore`,
//! `SprintStore`, `TaskStore`); this module combines them into a single
//! transaction type and the unit of work that commits it.

mod error;
mod unit_of_work;

pub use error::{StoreError, StoreResult};
pub use unit_of_work::{StoreTransaction, UnitOfWork};
