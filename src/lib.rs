//! Backlog: domain rules for a multi-project issue tracker.
//!
//! The crate owns the rules that must hold no matter how requests reach the
//! tracker: race-free `{project}-{n}` task identifiers, the task status
//! workflow, parent/child nesting between task types, the sprint lifecycle,
//! recursive sprint membership and role-based permission checks.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: pure types and state machines with no infrastructure
//! - **Ports**: trait interfaces for persistence and lookups
//! - **Services**: async orchestration that runs domain rules inside a
//!   single store transaction
//!
//! Persistence is shared through [`store`], whose unit of work commits or
//! rolls back every write a service makes as one.
//!
//! # Modules
//!
//! - [`project`]: projects, memberships and authorization
//! - [`task`]: task identity, hierarchy, workflow, observers and comments
//! - [`sprint`]: sprint lifecycle and recursive sprint membership
//! - [`store`]: unit-of-work port with in-memory and `PostgreSQL` adapters
//! - [`config`]: tunable limits
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: error categories shared by every service

pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod sprint;
pub mod store;
pub mod task;
