//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use backlog::{
    project::{
        domain::{Project, UserId},
        services::{CreateProjectRequest, ProjectService},
    },
    sprint::services::{SprintMembershipService, SprintService},
    store::adapters::postgres::PostgresStore,
    task::services::TaskService,
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::WrapErr;
use mockable::DefaultClock;
use tokio::sync::{Mutex, MutexGuard};

/// Environment variable naming the disposable test database.
pub const DATABASE_URL_VAR: &str = "BACKLOG_TEST_DATABASE_URL";

/// SQL that drops the tracker schema.
pub const DROP_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tracker_tables/down.sql");

/// SQL that creates the tracker schema.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tracker_tables/up.sql");

static DATABASE: Mutex<()> = Mutex::const_new(());

/// Services wired to one `PostgreSQL` store.
pub struct PgTracker {
    pub store: Arc<PostgresStore>,
    pub projects: ProjectService<PostgresStore>,
    pub tasks: TaskService<PostgresStore, DefaultClock>,
    pub sprints: SprintService<PostgresStore, DefaultClock>,
    pub membership: SprintMembershipService<PostgresStore, DefaultClock>,
    _exclusive: MutexGuard<'static, ()>,
}

impl PgTracker {
    /// Creates a project owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifiers are invalid or the insert fails.
    pub async fn project(&self, id: &str, owner: &str) -> eyre::Result<Project> {
        Ok(self
            .projects
            .create_project(CreateProjectRequest::new(
                id,
                format!("{id} board"),
                UserId::new(owner)?,
            ))
            .await?)
    }
}

/// Connects to the test database and recreates the schema.
///
/// Returns `None` when [`DATABASE_URL_VAR`] is unset. Tests sharing the
/// database are serialized for as long as the returned tracker lives.
///
/// # Errors
///
/// Returns an error when the pool cannot be built or the schema reset fails.
pub async fn pg_tracker() -> eyre::Result<Option<PgTracker>> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let exclusive = DATABASE.lock().await;
    let pool = Pool::builder()
        .max_size(8)
        .build(ConnectionManager::<PgConnection>::new(url))
        .wrap_err("build connection pool")?;
    let reset_pool = pool.clone();
    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        let mut conn = reset_pool.get().wrap_err("check out connection")?;
        conn.batch_execute(DROP_SCHEMA_SQL)
            .wrap_err("drop tracker schema")?;
        conn.batch_execute(CREATE_SCHEMA_SQL)
            .wrap_err("create tracker schema")?;
        Ok(())
    })
    .await
    .wrap_err("join schema reset")??;

    let store = Arc::new(PostgresStore::new(pool));
    let clock = Arc::new(DefaultClock);
    Ok(Some(PgTracker {
        store: Arc::clone(&store),
        projects: ProjectService::new(Arc::clone(&store)),
        tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
        sprints: SprintService::new(Arc::clone(&store), Arc::clone(&clock)),
        membership: SprintMembershipService::new(store, clock),
        _exclusive: exclusive,
    }))
}
