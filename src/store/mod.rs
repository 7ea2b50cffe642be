//! Transactional persistence shared by every bounded context.
//!
//! Services never talk to a database directly. They hand a closure to
//! [`ports::UnitOfWork::transact`], which runs it against a
//! [`ports::StoreTransaction`] and commits or rolls back as a whole.

pub mod adapters;
pub mod ports;

#[cfg(test)]
mod tests;
