//! Table mapping traits
//!
//! Every entity describes its table once through [`Entity`]; the generic
//! repository derives all of its SQL from that description.

use super::{Audit, SqlValue};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use std::fmt::Debug;
use uuid::Uuid;

/// Audit columns present on every table, in storage order
pub const AUDIT_COLUMNS: [&str; 4] = ["created_by", "created_at", "updated_by", "updated_at"];

/// Primary key of an entity: a single surrogate id or a composite pair
pub trait EntityKey: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Number of key columns
    const WIDTH: usize;

    /// Values in `Entity::KEY_COLUMNS` order
    fn values(&self) -> Vec<SqlValue>;

    /// True when any part of the key is zero, i.e. not assigned yet
    fn is_unset(&self) -> bool;

    /// Reads the key from the leading columns of a `RETURNING` row
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error>;

    /// Appends a predicate matching any of `keys`, bound as one array per
    /// key column so the list length never hits the bind parameter limit
    fn push_any(keys: &[Self], columns: &str, query_builder: &mut QueryBuilder<'static, Postgres>);
}

impl EntityKey for i32 {
    const WIDTH: usize = 1;

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::from(*self)]
    }

    fn is_unset(&self) -> bool {
        *self == 0
    }

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        row.try_get(0)
    }

    fn push_any(keys: &[Self], columns: &str, query_builder: &mut QueryBuilder<'static, Postgres>) {
        query_builder
            .push(columns)
            .push(" = ANY(")
            .push_bind(keys.to_vec())
            .push(")");
    }
}

impl EntityKey for (i32, i32) {
    const WIDTH: usize = 2;

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::from(self.0), SqlValue::from(self.1)]
    }

    fn is_unset(&self) -> bool {
        self.0 == 0 || self.1 == 0
    }

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok((row.try_get(0)?, row.try_get(1)?))
    }

    fn push_any(keys: &[Self], columns: &str, query_builder: &mut QueryBuilder<'static, Postgres>) {
        let (first, second): (Vec<i32>, Vec<i32>) = keys.iter().copied().unzip();
        query_builder
            .push("(")
            .push(columns)
            .push(") IN (SELECT * FROM UNNEST(")
            .push_bind(first)
            .push("::int4[], ")
            .push_bind(second)
            .push("::int4[]))");
    }
}

/// Field-to-column mapping of one table
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    type Key: EntityKey;

    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    /// Caller-writable columns, in the order produced by [`Entity::values`]
    const COLUMNS: &'static [&'static str];
    /// False when the caller supplies the key on insert
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Self::Key;
    fn uuid(&self) -> Uuid;
    fn audit(&self) -> &Audit;
    fn values(&self) -> Vec<SqlValue>;

    /// Every column of the table: keys, uuid, data, audit
    fn all_columns() -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(Self::KEY_COLUMNS.len() + Self::COLUMNS.len() + 5);
        columns.extend(Self::KEY_COLUMNS.iter().copied());
        columns.push("uuid");
        columns.extend(Self::COLUMNS.iter().copied());
        columns.extend(AUDIT_COLUMNS);
        columns
    }
}

/// Entities carrying a `start_date`/`end_date` validity window
pub trait ValidityWindow: Entity {}
