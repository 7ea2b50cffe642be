//! Shared fixtures for tracker integration tests.

use std::sync::{Arc, Once};

use backlog::{
    logging::{LoggingConfig, init_logging},
    project::{
        domain::{Project, UserId},
        services::{AuthorizationEvaluator, CreateProjectRequest, ProjectService},
    },
    sprint::services::{SprintMembershipService, SprintService},
    store::adapters::memory::InMemoryStore,
    task::services::TaskService,
};
use mockable::DefaultClock;
use rstest::fixture;

static LOGGING: Once = Once::new();

/// Every service of the tracker wired to one in-memory store.
pub struct Tracker {
    pub projects: Arc<ProjectService<InMemoryStore>>,
    pub authorization: AuthorizationEvaluator<ProjectService<InMemoryStore>>,
    pub tasks: TaskService<InMemoryStore, DefaultClock>,
    pub sprints: SprintService<InMemoryStore, DefaultClock>,
    pub membership: SprintMembershipService<InMemoryStore, DefaultClock>,
}

impl Tracker {
    /// Creates a project owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifiers are invalid or the project exists.
    pub async fn project(&self, id: &str, owner: &str) -> eyre::Result<Project> {
        Ok(self
            .projects
            .create_project(CreateProjectRequest::new(id, format!("{id} board"), user(owner)?))
            .await?)
    }
}

/// Parses a user identifier.
///
/// # Errors
///
/// Returns an error for a blank name.
pub fn user(name: &str) -> eyre::Result<UserId> {
    Ok(UserId::new(name)?)
}

/// Provides a fresh tracker; installs the test subscriber once per binary.
#[fixture]
pub fn tracker() -> Tracker {
    LOGGING.call_once(|| {
        // Another harness may already own the global subscriber.
        drop(init_logging(&LoggingConfig::for_tests()));
    });
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let projects = Arc::new(ProjectService::new(Arc::clone(&store)));
    Tracker {
        authorization: AuthorizationEvaluator::new(Arc::clone(&projects)),
        projects,
        tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
        sprints: SprintService::new(Arc::clone(&store), Arc::clone(&clock)),
        membership: SprintMembershipService::new(store, clock),
    }
}
