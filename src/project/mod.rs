//! Projects, memberships and role-based authorization.
//!
//! A project scopes every sprint and task and owns the counter from which
//! task numbers are minted. Memberships assign each user one role per
//! project; [`services::AuthorizationEvaluator`] turns those roles into
//! allow/deny decisions. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
