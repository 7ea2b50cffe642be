//! Tasks: identity, hierarchy, workflow and collaboration.
//!
//! Tasks are identified by `{project}-{n}` keys minted from their project's
//! counter. Parent links follow the type nesting policy, status changes
//! follow the workflow table, and observers and comments hang off each
//! task. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
