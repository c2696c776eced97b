//! Repository - every operation, written once over [`Entity`]
//!
//! Each statement is built with `sqlx::QueryBuilder` from the entity's column
//! mapping, so values only ever travel as bind parameters. The statement is
//! then handed to the repository's [`Connector`]. Every call runs under the
//! repository timeout; mutations run in a single-statement transaction that
//! is rolled back on failure.

use super::connector::Connector;
use super::copy;
use super::filter;
use super::traits::{
    BulkCreate, Count, Create, Delete, Inserted, Paginate, Read, ReadAll, ReadByUuid, ReadMany,
    Update,
};
use crate::core::DalError;
use crate::dtos::PageQuery;
use crate::entities::{Entity, EntityKey, SqlValue, ValidityWindow};
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub struct Repository<E, C = PgPool> {
    connector: C,
    timeout: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E, C: Clone> Clone for Repository<E, C> {
    fn clone(&self) -> Self {
        Self {
            connector: self.connector.clone(),
            timeout: self.timeout,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, C: Connector> Repository<E, C> {
    pub fn with_timeout(connector: C, timeout: Duration) -> Self {
        Self {
            connector,
            timeout,
            _entity: PhantomData,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `operation` under the repository timeout
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, DalError>>,
    ) -> Result<T, DalError> {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                error!(table = E::TABLE, timeout = ?self.timeout, "Query timed out");
                Err(DalError::Timeout {
                    table: E::TABLE,
                    timeout: self.timeout,
                })
            }
        }
    }

    fn select() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new(format!(
            "SELECT {} FROM {}",
            E::all_columns().join(", "),
            E::TABLE
        ))
    }

    /// `k1 = $n AND k2 = $m`
    fn push_key(query_builder: &mut QueryBuilder<'static, Postgres>, key: &E::Key) {
        for (i, (column, value)) in E::KEY_COLUMNS.iter().zip(key.values()).enumerate() {
            if i > 0 {
                query_builder.push(" AND ");
            }
            query_builder.push(*column).push(" = ");
            value.push_bind(query_builder);
        }
    }

    fn insert_query(entity: &E) -> QueryBuilder<'static, Postgres> {
        let mut columns: Vec<&'static str> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();
        if !E::GENERATED_KEY {
            columns.extend(E::KEY_COLUMNS.iter().copied());
            values.extend(entity.key().values());
        }
        columns.extend(E::COLUMNS.iter().copied());
        values.extend(entity.values());
        columns.extend(["created_by", "updated_by"]);
        values.push(entity.audit().creator().into());
        values.push(entity.audit().updater().into());

        let mut query_builder = QueryBuilder::new(format!(
            "INSERT INTO {} ({}, created_at, updated_at) VALUES (",
            E::TABLE,
            columns.join(", ")
        ));
        for value in values {
            value.push_bind(&mut query_builder);
            query_builder.push(", ");
        }
        query_builder
            .push("NOW(), NOW()) RETURNING ")
            .push(E::KEY_COLUMNS.join(", "))
            .push(", uuid");
        query_builder
    }

    /// Full overwrite of the mutable columns; `updated_at` comes from the server clock
    fn update_query(entity: &E) -> QueryBuilder<'static, Postgres> {
        let mut query_builder = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        for (column, value) in E::COLUMNS.iter().zip(entity.values()) {
            query_builder.push(*column).push(" = ");
            value.push_bind(&mut query_builder);
            query_builder.push(", ");
        }
        query_builder.push("updated_by = ");
        query_builder.push_bind(entity.audit().updater());
        query_builder.push(", updated_at = NOW() WHERE ");
        Self::push_key(&mut query_builder, &entity.key());
        query_builder
    }

    fn delete_query(key: &E::Key) -> QueryBuilder<'static, Postgres> {
        let mut query_builder = QueryBuilder::new(format!("DELETE FROM {} WHERE ", E::TABLE));
        Self::push_key(&mut query_builder, key);
        query_builder
    }

    /// Rows whose `column` equals `value`, optionally ordered
    pub(crate) async fn find_all_by(
        &self,
        column: &'static str,
        value: SqlValue,
        order_by: Option<&'static str>,
    ) -> Result<Vec<E>, DalError> {
        let mut query_builder = Self::select();
        query_builder.push(" WHERE ").push(column).push(" = ");
        value.push_bind(&mut query_builder);
        if let Some(order_by) = order_by {
            query_builder.push(" ORDER BY ").push(order_by);
        }
        self.bounded(self.connector.fetch_all(query_builder))
            .await
            .inspect_err(|err| error!(table = E::TABLE, column, error = %err, "Lookup failed"))
    }

    /// Row with the lowest key among those whose `column` equals `value`
    pub(crate) async fn find_one_by(
        &self,
        column: &'static str,
        value: SqlValue,
    ) -> Result<Option<E>, DalError> {
        let mut query_builder = Self::select();
        query_builder.push(" WHERE ").push(column).push(" = ");
        value.push_bind(&mut query_builder);
        query_builder
            .push(" ORDER BY ")
            .push(E::KEY_COLUMNS.join(", "))
            .push(" LIMIT 1");
        self.bounded(self.connector.fetch_optional(query_builder))
            .await
            .inspect_err(|err| error!(table = E::TABLE, column, error = %err, "Lookup failed"))
    }
}

impl<E: ValidityWindow, C: Connector> Repository<E, C> {
    /// Rows whose `end_date - start_date` exceeds `days` days.
    /// Rows with an open end (NULL) never match.
    #[instrument(skip(self), fields(table = E::TABLE))]
    pub async fn find_validity_longer_than(&self, days: i32) -> Result<Vec<E>, DalError> {
        debug!("Finding rows by validity gap");
        let mut query_builder = Self::select();
        query_builder
            .push(" WHERE end_date - start_date > make_interval(days => ")
            .push_bind(days)
            .push(")");
        self.bounded(self.connector.fetch_all(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Validity gap query failed"))
    }
}

impl<E: Entity, C: Connector> Create<E, E::Key> for Repository<E, C> {
    #[instrument(skip(self, data), fields(table = E::TABLE))]
    async fn create(&self, data: &E) -> Result<Inserted<E::Key>, DalError> {
        debug!("Inserting row");
        let inserted = self
            .bounded(self.connector.insert(Self::insert_query(data)))
            .await
            .inspect_err(|err| error!(error = %err, "Insert failed"))?;

        info!(key = ?inserted.key, uuid = %inserted.uuid, "Row inserted");
        Ok(inserted)
    }
}

impl<E: Entity, C: Connector> BulkCreate<E> for Repository<E, C> {
    #[instrument(skip(self, data), fields(table = E::TABLE, rows = data.len()))]
    async fn create_many(&self, data: &[E]) -> Result<u64, DalError> {
        if data.is_empty() {
            debug!("Nothing to copy");
            return Ok(0);
        }
        let statement = copy::copy_statement::<E>();
        let payload = copy::encode_rows(data, Utc::now());
        let copied = self
            .bounded(self.connector.copy_in(statement, payload))
            .await
            .inspect_err(|err| error!(error = %err, "Bulk copy failed"))?;

        info!(copied, "Bulk copy finished");
        Ok(copied)
    }
}

impl<E: Entity, C: Connector> Read<E, E::Key> for Repository<E, C> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn read(&self, id: &E::Key) -> Result<Option<E>, DalError> {
        debug!("Reading row by key");
        let mut query_builder = Self::select();
        query_builder.push(" WHERE ");
        Self::push_key(&mut query_builder, id);

        let row = self
            .bounded(self.connector.fetch_optional(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Read failed"))?;

        if row.is_some() {
            debug!("Row found");
        } else {
            debug!("Row not found");
        }
        Ok(row)
    }
}

impl<E: Entity, C: Connector> ReadMany<E, E::Key> for Repository<E, C> {
    #[instrument(skip(self, ids), fields(table = E::TABLE, requested = ids.len()))]
    async fn read_many(&self, ids: &[E::Key]) -> Result<Vec<E>, DalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Reading rows by key list");
        let mut query_builder = Self::select();
        query_builder.push(" WHERE ");
        <E::Key as EntityKey>::push_any(ids, &E::KEY_COLUMNS.join(", "), &mut query_builder);

        self.bounded(self.connector.fetch_all(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Read by key list failed"))
    }
}

impl<E: Entity, C: Connector> ReadByUuid<E> for Repository<E, C> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn read_by_uuid(&self, uuid: &Uuid) -> Result<Option<E>, DalError> {
        debug!("Reading row by uuid");
        let mut query_builder = Self::select();
        query_builder.push(" WHERE uuid = ").push_bind(*uuid);
        self.bounded(self.connector.fetch_optional(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Read by uuid failed"))
    }

    #[instrument(skip(self, uuids), fields(table = E::TABLE, requested = uuids.len()))]
    async fn read_many_by_uuid(&self, uuids: &[Uuid]) -> Result<Vec<E>, DalError> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Reading rows by uuid list");
        let mut query_builder = Self::select();
        query_builder
            .push(" WHERE uuid = ANY(")
            .push_bind(uuids.to_vec())
            .push(")");
        self.bounded(self.connector.fetch_all(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Read by uuid list failed"))
    }
}

impl<E: Entity, C: Connector> ReadAll<E> for Repository<E, C> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn read_all(&self) -> Result<Vec<E>, DalError> {
        debug!("Reading all rows");
        self.bounded(self.connector.fetch_all(Self::select()))
            .await
            .inspect_err(|err| error!(error = %err, "Read all failed"))
    }
}

impl<E: Entity, C: Connector> Paginate<E> for Repository<E, C> {
    #[instrument(skip(self, page), fields(table = E::TABLE, start = ?page.start, end = ?page.end))]
    async fn paginate(&self, page: &PageQuery) -> Result<Vec<E>, DalError> {
        debug!(filters = page.filters.len(), "Reading page");
        let mut query_builder = Self::select();
        if let Err(err) = filter::push_page::<E>(&mut query_builder, page) {
            warn!(error = %err, "Rejected page request");
            return Err(err);
        }
        self.bounded(self.connector.fetch_all(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Page read failed"))
    }
}

impl<E: Entity, C: Connector> Update<E> for Repository<E, C> {
    #[instrument(skip(self, data), fields(table = E::TABLE, key = ?data.key()))]
    async fn update(&self, data: &E) -> Result<(), DalError> {
        if data.key().is_unset() {
            warn!("Refusing update without a primary key");
            return Err(DalError::MissingKey { table: E::TABLE });
        }
        debug!("Updating row");
        let affected = self
            .bounded(self.connector.execute(Self::update_query(data)))
            .await
            .inspect_err(|err| error!(error = %err, "Update failed"))?;

        info!(affected, "Row updated");
        Ok(())
    }
}

impl<E: Entity, C: Connector> Delete<E::Key> for Repository<E, C> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn delete(&self, id: &E::Key) -> Result<(), DalError> {
        debug!("Deleting row");
        let affected = self
            .bounded(self.connector.execute(Self::delete_query(id)))
            .await
            .inspect_err(|err| error!(error = %err, "Delete failed"))?;

        info!(affected, "Row deleted");
        Ok(())
    }
}

impl<E: Entity, C: Connector> Count for Repository<E, C> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn count(&self) -> Result<i64, DalError> {
        let query_builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        self.bounded(self.connector.fetch_count(query_builder))
            .await
            .inspect_err(|err| error!(error = %err, "Count failed"))
    }
}
