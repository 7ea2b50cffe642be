//! Step definitions for sprint cascade scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
