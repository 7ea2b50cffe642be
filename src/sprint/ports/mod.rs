//! Port contracts for sprint persistence.

mod store;

pub use store::SprintStore;
