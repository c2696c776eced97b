//! Connector - the connection source a [`Repository`](super::Repository) runs on
//!
//! The repository only builds statements; a [`Connector`] runs them. It is
//! implemented for a [`PgPool`] and for a [`SharedConnection`] wrapping a
//! single connection or an open transaction owned by the caller. Mutations
//! run in their own transaction (a savepoint when the caller already has one
//! open) and are rolled back when the statement fails.

use super::traits::Inserted;
use crate::core::DalError;
use crate::entities::{Entity, EntityKey};
use sqlx::{Connection, PgConnection, PgPool, Postgres, QueryBuilder, Row, Transaction};
use std::future::Future;
use std::ops::DerefMut;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

/// Query, single-row query, exec, begin and copy-from, as used by the repository
pub trait Connector: Clone + Send + Sync + 'static {
    /// Every row produced by `query`
    fn fetch_all<E: Entity>(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> impl Future<Output = Result<Vec<E>, DalError>> + Send;

    /// The first row produced by `query`, if any
    fn fetch_optional<E: Entity>(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> impl Future<Output = Result<Option<E>, DalError>> + Send;

    /// A single `BIGINT` such as `COUNT(*)`
    fn fetch_count(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> impl Future<Output = Result<i64, DalError>> + Send;

    /// Runs an `INSERT .. RETURNING <key columns>, uuid` in a transaction
    fn insert<K: EntityKey>(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> impl Future<Output = Result<Inserted<K>, DalError>> + Send;

    /// Runs `query` in a transaction and returns the affected row count
    fn execute(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> impl Future<Output = Result<u64, DalError>> + Send;

    /// Streams a text-format payload through `COPY .. FROM STDIN`
    fn copy_in(
        &self,
        statement: String,
        payload: String,
    ) -> impl Future<Output = Result<u64, DalError>> + Send;
}

impl Connector for PgPool {
    async fn fetch_all<E: Entity>(
        &self,
        mut query: QueryBuilder<'static, Postgres>,
    ) -> Result<Vec<E>, DalError> {
        Ok(query.build_query_as::<E>().fetch_all(self).await?)
    }

    async fn fetch_optional<E: Entity>(
        &self,
        mut query: QueryBuilder<'static, Postgres>,
    ) -> Result<Option<E>, DalError> {
        Ok(query.build_query_as::<E>().fetch_optional(self).await?)
    }

    async fn fetch_count(&self, mut query: QueryBuilder<'static, Postgres>) -> Result<i64, DalError> {
        Ok(query.build_query_scalar::<i64>().fetch_one(self).await?)
    }

    async fn insert<K: EntityKey>(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> Result<Inserted<K>, DalError> {
        let mut conn = self.acquire().await?;
        insert_on(&mut conn, query).await
    }

    async fn execute(&self, query: QueryBuilder<'static, Postgres>) -> Result<u64, DalError> {
        let mut conn = self.acquire().await?;
        execute_on(&mut conn, query).await
    }

    async fn copy_in(&self, statement: String, payload: String) -> Result<u64, DalError> {
        let mut conn = self.acquire().await?;
        copy_on(&mut conn, &statement, payload).await
    }
}

/// One connection shared by clones of the same repository
///
/// `C` is anything that derefs to a [`PgConnection`]: a `PoolConnection<Postgres>`
/// checked out by the caller, or a `Transaction<'static, Postgres>` the caller
/// commits once every repository call is done.
pub struct SharedConnection<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for SharedConnection<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> SharedConnection<C> {
    pub fn new(connection: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    /// Gives the connection back once every clone is dropped
    pub fn into_inner(self) -> Option<C> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}

impl<C> Connector for SharedConnection<C>
where
    C: DerefMut<Target = PgConnection> + Send + 'static,
{
    async fn fetch_all<E: Entity>(
        &self,
        mut query: QueryBuilder<'static, Postgres>,
    ) -> Result<Vec<E>, DalError> {
        let mut conn = self.inner.lock().await;
        Ok(query.build_query_as::<E>().fetch_all(&mut **conn).await?)
    }

    async fn fetch_optional<E: Entity>(
        &self,
        mut query: QueryBuilder<'static, Postgres>,
    ) -> Result<Option<E>, DalError> {
        let mut conn = self.inner.lock().await;
        Ok(query.build_query_as::<E>().fetch_optional(&mut **conn).await?)
    }

    async fn fetch_count(&self, mut query: QueryBuilder<'static, Postgres>) -> Result<i64, DalError> {
        let mut conn = self.inner.lock().await;
        Ok(query.build_query_scalar::<i64>().fetch_one(&mut **conn).await?)
    }

    async fn insert<K: EntityKey>(
        &self,
        query: QueryBuilder<'static, Postgres>,
    ) -> Result<Inserted<K>, DalError> {
        let mut conn = self.inner.lock().await;
        insert_on(&mut conn, query).await
    }

    async fn execute(&self, query: QueryBuilder<'static, Postgres>) -> Result<u64, DalError> {
        let mut conn = self.inner.lock().await;
        execute_on(&mut conn, query).await
    }

    async fn copy_in(&self, statement: String, payload: String) -> Result<u64, DalError> {
        let mut conn = self.inner.lock().await;
        copy_on(&mut conn, &statement, payload).await
    }
}

async fn insert_on<K: EntityKey>(
    conn: &mut PgConnection,
    mut query: QueryBuilder<'static, Postgres>,
) -> Result<Inserted<K>, DalError> {
    let mut tx = conn.begin().await?;
    let outcome = query.build().fetch_one(&mut *tx).await;
    let row = match outcome {
        Ok(row) => row,
        Err(err) => return Err(rollback(tx, err).await),
    };
    let key = K::decode(&row)?;
    // uuid follows the key columns in RETURNING
    let uuid: Uuid = row.try_get(K::WIDTH)?;
    tx.commit().await?;
    Ok(Inserted { key, uuid })
}

async fn execute_on(
    conn: &mut PgConnection,
    mut query: QueryBuilder<'static, Postgres>,
) -> Result<u64, DalError> {
    let mut tx = conn.begin().await?;
    let outcome = query.build().execute(&mut *tx).await;
    match outcome {
        Ok(result) => {
            tx.commit().await?;
            Ok(result.rows_affected())
        }
        Err(err) => Err(rollback(tx, err).await),
    }
}

async fn copy_on(conn: &mut PgConnection, statement: &str, payload: String) -> Result<u64, DalError> {
    let mut copy = conn.copy_in_raw(statement).await?;
    let sent = copy.send(payload.into_bytes()).await.map(|_| ());
    if let Err(err) = sent {
        if let Err(abort_err) = copy.abort(err.to_string()).await {
            warn!(error = %abort_err, "Aborting bulk copy failed");
        }
        return Err(err.into());
    }
    Ok(copy.finish().await?)
}

/// Rolls `tx` back and reports `source`, attaching the rollback error if any
async fn rollback(tx: Transaction<'_, Postgres>, source: sqlx::Error) -> DalError {
    match tx.rollback().await {
        Ok(()) => DalError::from(source),
        Err(rollback) => {
            warn!(error = %rollback, "Rollback failed");
            DalError::RollbackFailed { source, rollback }
        }
    }
}
