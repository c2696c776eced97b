//! Column values - typed scalars that can be bound to a statement or
//! written as a COPY text-format field.

use crate::core::DalError;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// One column value. The variant fixes the Postgres type even when the
/// value is NULL, so binds never rely on server-side inference.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    BigInt(Option<i64>),
    Text(Option<String>),
    Bool(Option<bool>),
    Uuid(Option<Uuid>),
    Timestamp(Option<DateTime<Utc>>),
    Decimal(Option<Decimal>),
    Json(Option<serde_json::Value>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Int(v) => v.is_none(),
            SqlValue::BigInt(v) => v.is_none(),
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::Uuid(v) => v.is_none(),
            SqlValue::Timestamp(v) => v.is_none(),
            SqlValue::Decimal(v) => v.is_none(),
            SqlValue::Json(v) => v.is_none(),
        }
    }

    /// Postgres type the value binds as
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Int(_) => "int4",
            SqlValue::BigInt(_) => "int8",
            SqlValue::Text(_) => "text",
            SqlValue::Bool(_) => "bool",
            SqlValue::Uuid(_) => "uuid",
            SqlValue::Timestamp(_) => "timestamptz",
            SqlValue::Decimal(_) => "numeric",
            SqlValue::Json(_) => "jsonb",
        }
    }

    /// Binds `values` as a single array parameter, for `= ANY($n)`.
    ///
    /// NULLs are left out: they never compare equal. Every value must
    /// share one type, otherwise `InvalidFilter` is returned.
    pub fn push_bind_array(
        values: &[SqlValue],
        query_builder: &mut QueryBuilder<'_, Postgres>,
    ) -> Result<(), DalError> {
        let Some(first) = values.first() else {
            return Err(DalError::InvalidFilter("empty value list".to_string()));
        };
        if let Some(other) = values.iter().find(|v| v.type_name() != first.type_name()) {
            return Err(DalError::InvalidFilter(format!(
                "value list mixes {} and {}",
                first.type_name(),
                other.type_name()
            )));
        }

        macro_rules! bind_array {
            ($variant:ident) => {{
                let array: Vec<_> = values
                    .iter()
                    .filter_map(|value| match value {
                        SqlValue::$variant(v) => v.clone(),
                        _ => None,
                    })
                    .collect();
                query_builder.push_bind(array);
            }};
        }

        match first {
            SqlValue::Int(_) => bind_array!(Int),
            SqlValue::BigInt(_) => bind_array!(BigInt),
            SqlValue::Text(_) => bind_array!(Text),
            SqlValue::Bool(_) => bind_array!(Bool),
            SqlValue::Uuid(_) => bind_array!(Uuid),
            SqlValue::Timestamp(_) => bind_array!(Timestamp),
            SqlValue::Decimal(_) => bind_array!(Decimal),
            SqlValue::Json(_) => bind_array!(Json),
        }
        Ok(())
    }

    /// Appends a `$n` placeholder and binds the value to it
    pub fn push_bind(self, query_builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Int(v) => query_builder.push_bind(v),
            SqlValue::BigInt(v) => query_builder.push_bind(v),
            SqlValue::Text(v) => query_builder.push_bind(v),
            SqlValue::Bool(v) => query_builder.push_bind(v),
            SqlValue::Uuid(v) => query_builder.push_bind(v),
            SqlValue::Timestamp(v) => query_builder.push_bind(v),
            SqlValue::Decimal(v) => query_builder.push_bind(v),
            SqlValue::Json(v) => query_builder.push_bind(v),
        };
    }

    /// Writes the value as one field of a `COPY ... FROM STDIN` text row
    pub fn write_copy_text(&self, out: &mut String) {
        if self.is_null() {
            out.push_str("\\N");
            return;
        }
        match self {
            SqlValue::Int(Some(v)) => out.push_str(&v.to_string()),
            SqlValue::BigInt(Some(v)) => out.push_str(&v.to_string()),
            SqlValue::Text(Some(v)) => escape_copy_text(v, out),
            SqlValue::Bool(Some(v)) => out.push(if *v { 't' } else { 'f' }),
            SqlValue::Uuid(Some(v)) => out.push_str(&v.hyphenated().to_string()),
            SqlValue::Timestamp(Some(v)) => {
                out.push_str(&v.to_rfc3339_opts(SecondsFormat::Micros, true))
            }
            SqlValue::Decimal(Some(v)) => out.push_str(&v.to_string()),
            SqlValue::Json(Some(v)) => escape_copy_text(&v.to_string(), out),
            _ => out.push_str("\\N"),
        }
    }
}

fn escape_copy_text(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
}

macro_rules! sql_value_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SqlValue {
            fn from(value: $ty) -> Self {
                SqlValue::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(value: Option<$ty>) -> Self {
                SqlValue::$variant(value)
            }
        }
    };
}

sql_value_from!(Int, i32);
sql_value_from!(BigInt, i64);
sql_value_from!(Text, String);
sql_value_from!(Bool, bool);
sql_value_from!(Uuid, Uuid);
sql_value_from!(Timestamp, DateTime<Utc>);
sql_value_from!(Decimal, Decimal);
sql_value_from!(Json, serde_json::Value);

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}
