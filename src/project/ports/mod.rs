//! Port contracts for projects and memberships.

mod directory;
mod store;

#[cfg(test)]
pub use directory::MockMembershipDirectory;
pub use directory::MembershipDirectory;
pub use store::ProjectStore;
