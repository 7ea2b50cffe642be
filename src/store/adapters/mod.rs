//! Unit-of-work implementations.

pub mod memory;
pub mod postgres;
