//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

mod store;

pub use store::TaskStore;
