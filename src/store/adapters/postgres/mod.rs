//! `PostgreSQL` unit of work backed by Diesel.
//!
//! Every [`UnitOfWork::transact`] call checks a connection out of the pool on
//! a blocking thread and runs the caller's work inside a database
//! transaction. Row locks from `SELECT ... FOR UPDATE` are held until the
//! transaction ends.

mod conversion;
mod models;
mod schema;
mod transaction;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

use crate::store::ports::{StoreError, StoreTransaction, UnitOfWork};
use transaction::PgStoreTransaction;

/// `PostgreSQL` connection pool type used by the store.
pub type StorePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed unit of work.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: StorePgPool,
}

impl PostgresStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: StorePgPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a Diesel transaction: either the caller's own error or a
/// database error raised while committing or rolling back.
enum TransactionFailure<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TransactionFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E: From<StoreError>> TransactionFailure<E> {
    fn into_error(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => StoreError::persistence(err).into(),
        }
    }
}

#[async_trait]
impl UnitOfWork for PostgresStore {
    async fn transact<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<T, E> {
            let mut pooled = pool.get().map_err(StoreError::persistence)?;
            let connection: &mut PgConnection = &mut pooled;
            connection
                .transaction::<T, TransactionFailure<E>, _>(|conn| {
                    work(&mut PgStoreTransaction::new(conn)).map_err(TransactionFailure::Work)
                })
                .map_err(TransactionFailure::into_error)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}
