//! Shared world state for sprint cascade BDD scenarios.

use std::sync::Arc;

use backlog::{
    project::{domain::ProjectId, services::ProjectService},
    sprint::{
        domain::Sprint,
        services::{SprintMembershipError, SprintMembershipService, SprintService},
    },
    store::adapters::memory::InMemoryStore,
    task::{domain::{Task, TaskKey}, services::TaskService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for sprint cascade behaviour tests.
pub struct SprintCascadeWorld {
    pub projects: ProjectService<InMemoryStore>,
    pub tasks: TaskService<InMemoryStore, DefaultClock>,
    pub sprints: SprintService<InMemoryStore, DefaultClock>,
    pub membership: SprintMembershipService<InMemoryStore, DefaultClock>,
    pub project: Option<ProjectId>,
    pub tree: Vec<Task>,
    pub sprint: Option<Sprint>,
    pub last_result: Option<Result<Vec<TaskKey>, SprintMembershipError>>,
}

impl SprintCascadeWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            projects: ProjectService::new(Arc::clone(&store)),
            tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            sprints: SprintService::new(Arc::clone(&store), Arc::clone(&clock)),
            membership: SprintMembershipService::new(store, clock),
            project: None,
            tree: Vec::new(),
            sprint: None,
            last_result: None,
        }
    }

    /// Returns the scenario's project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project step has run.
    pub fn project(&self) -> eyre::Result<&ProjectId> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the scenario's sprint.
    ///
    /// # Errors
    ///
    /// Returns an error when no sprint step has run.
    pub fn sprint(&self) -> eyre::Result<&Sprint> {
        self.sprint
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing sprint in scenario world"))
    }

    /// Returns the task at `depth` in the epic chain, the epic being zero.
    ///
    /// # Errors
    ///
    /// Returns an error when the chain is shorter than `depth`.
    pub fn tree_node(&self, depth: usize) -> eyre::Result<&Task> {
        self.tree
            .get(depth)
            .ok_or_else(|| eyre::eyre!("missing task at depth {depth} in scenario world"))
    }
}

impl Default for SprintCascadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintCascadeWorld {
    SprintCascadeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
