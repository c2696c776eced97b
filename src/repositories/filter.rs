//! Filter predicates and page rendering
//!
//! Callers describe filters as data; column names are checked against the
//! entity's column list and every value goes out as a bind parameter.

use crate::core::DalError;
use crate::dtos::PageQuery;
use crate::entities::{Entity, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    ILike,
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Ne => " <> ",
            CompareOp::Lt => " < ",
            CompareOp::Le => " <= ",
            CompareOp::Gt => " > ",
            CompareOp::Ge => " >= ",
            CompareOp::Like => " LIKE ",
            CompareOp::ILike => " ILIKE ",
        }
    }
}

/// How consecutive predicates combine
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Joiner {
    #[default]
    And,
    Or,
}

impl Joiner {
    fn as_sql(&self) -> &'static str {
        match self {
            Joiner::And => " AND ",
            Joiner::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: String,
        op: CompareOp,
        value: SqlValue,
    },
    In {
        column: String,
        values: Vec<SqlValue>,
    },
    IsNull(String),
    IsNotNull(String),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<SqlValue>) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::Like, SqlValue::Text(Some(pattern.into())))
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::ILike, SqlValue::Text(Some(pattern.into())))
    }

    pub fn is_in<V: Into<SqlValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Predicate::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Predicate::IsNotNull(column.into())
    }

    fn column(&self) -> &str {
        match self {
            Predicate::Compare { column, .. }
            | Predicate::In { column, .. }
            | Predicate::IsNull(column)
            | Predicate::IsNotNull(column) => column,
        }
    }

    /// Renders `(column op $n)` into the builder
    pub fn push_to<E: Entity>(&self, query_builder: &mut QueryBuilder<'_, Postgres>) -> Result<(), DalError> {
        let column = checked_column::<E>(self.column())?;
        query_builder.push("(").push(column);
        match self {
            Predicate::Compare { op, value, .. } => {
                query_builder.push(op.as_sql());
                value.clone().push_bind(query_builder);
            }
            // an empty list has no element type to bind; nothing matches it anyway
            Predicate::In { values, .. } if values.is_empty() => {
                query_builder.push(" IS NULL AND FALSE");
            }
            Predicate::In { values, .. } => {
                query_builder.push(" = ANY(");
                SqlValue::push_bind_array(values, query_builder)?;
                query_builder.push(")");
            }
            Predicate::IsNull(_) => {
                query_builder.push(" IS NULL");
            }
            Predicate::IsNotNull(_) => {
                query_builder.push(" IS NOT NULL");
            }
        }
        query_builder.push(")");
        Ok(())
    }
}

/// Returns the entity's own spelling of `column`, or `UnknownColumn`
pub(crate) fn checked_column<E: Entity>(column: &str) -> Result<&'static str, DalError> {
    E::all_columns()
        .into_iter()
        .find(|known| *known == column)
        .ok_or_else(|| DalError::UnknownColumn {
            table: E::TABLE,
            column: column.to_string(),
        })
}

/// Appends `WHERE`, `ORDER BY` and `OFFSET/LIMIT` for `page` to a SELECT
pub(crate) fn push_page<E: Entity>(
    query_builder: &mut QueryBuilder<'_, Postgres>,
    page: &PageQuery,
) -> Result<(), DalError> {
    page.check()?;

    if !page.filters.is_empty() {
        query_builder.push(" WHERE ");
        for (i, predicate) in page.filters.iter().enumerate() {
            if i > 0 {
                query_builder.push(page.joiner.as_sql());
            }
            predicate.push_to::<E>(query_builder)?;
        }
    }

    if let Some(ref sort) = page.sort {
        let column = checked_column::<E>(sort)?;
        let order = page.order.unwrap_or_default();
        query_builder
            .push(" ORDER BY ")
            .push(column)
            .push(" ")
            .push(order.as_sql());
    }

    // integers only, so inlining them cannot inject anything
    if let Some((offset, limit)) = page.offset_limit() {
        query_builder
            .push(" OFFSET ")
            .push(offset)
            .push(" LIMIT ")
            .push(limit);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::SortOrder;
    use crate::entities::{Pool, Tax};

    fn render(page: &PageQuery) -> Result<String, DalError> {
        let mut query_builder = QueryBuilder::<Postgres>::new("SELECT pool_id FROM pools");
        push_page::<Pool>(&mut query_builder, page)?;
        Ok(query_builder.sql().to_string())
    }

    #[test]
    fn window_renders_offset_and_limit() {
        let sql = render(&PageQuery::window(1, 10)).unwrap();
        assert_eq!(sql, "SELECT pool_id FROM pools OFFSET 1 LIMIT 9");
    }

    #[test]
    fn zero_start_renders_no_window() {
        let sql = render(&PageQuery::window(0, 10)).unwrap();
        assert_eq!(sql, "SELECT pool_id FROM pools");
        let sql = render(&PageQuery::window(3, 0)).unwrap();
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn filters_are_bound_and_joined() {
        let page = PageQuery::default()
            .filter(Predicate::eq("exchange_id", 4_i32))
            .filter(Predicate::ilike("name", "%usdc%"))
            .filter(Predicate::is_not_null("pool_address"));
        let sql = render(&page).unwrap();
        assert_eq!(
            sql,
            "SELECT pool_id FROM pools WHERE (exchange_id = $1) AND (name ILIKE $2) AND (pool_address IS NOT NULL)"
        );
    }

    #[test]
    fn or_joiner_is_explicit() {
        let page = PageQuery::default()
            .filter(Predicate::eq("chain_id", 1_i32))
            .filter(Predicate::eq("chain_id", 10_i32))
            .joined_by(Joiner::Or);
        let sql = render(&page).unwrap();
        assert!(sql.ends_with("WHERE (chain_id = $1) OR (chain_id = $2)"));
    }

    #[test]
    fn in_list_binds_one_array() {
        let page = PageQuery::default()
            .filter(Predicate::is_in("status_id", [1_i32, 2, 3]))
            .filter(Predicate::eq("exchange_id", 4_i32));
        let sql = render(&page).unwrap();
        assert!(sql.ends_with("WHERE (status_id = ANY($1)) AND (exchange_id = $2)"));
    }

    #[test]
    fn long_in_list_stays_one_parameter() {
        let page = PageQuery::default().filter(Predicate::is_in("pool_id", 1..=70_000_i32));
        let sql = render(&page).unwrap();
        assert!(sql.ends_with("WHERE (pool_id = ANY($1))"));
    }

    #[test]
    fn mixed_in_list_is_rejected() {
        let page = PageQuery::default().filter(Predicate::In {
            column: "status_id".to_string(),
            values: vec![SqlValue::from(1_i32), SqlValue::from(2_i64)],
        });
        assert!(matches!(render(&page), Err(DalError::InvalidFilter(_))));
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let page = PageQuery::default().filter(Predicate::is_in("status_id", Vec::<i32>::new()));
        let sql = render(&page).unwrap();
        assert!(sql.ends_with("WHERE (status_id IS NULL AND FALSE)"));
    }

    #[test]
    fn sort_filter_and_window_compose() {
        let page = PageQuery::window(20, 30)
            .sorted_by("name", SortOrder::Desc)
            .filter(Predicate::gt("fee_tier", 100_i32));
        let sql = render(&page).unwrap();
        assert_eq!(
            sql,
            "SELECT pool_id FROM pools WHERE (fee_tier > $1) ORDER BY name DESC OFFSET 20 LIMIT 10"
        );
    }

    #[test]
    fn unknown_filter_column_is_rejected() {
        let page = PageQuery::default().filter(Predicate::eq("1=1 OR name", "x"));
        let err = render(&page).unwrap_err();
        assert!(matches!(err, DalError::UnknownColumn { table: "pools", .. }));
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let page = PageQuery::default().sorted_by("tax_rate", SortOrder::Asc);
        assert!(render(&page).is_err());

        let mut query_builder = QueryBuilder::<Postgres>::new("SELECT tax_id FROM taxes");
        assert!(push_page::<Tax>(&mut query_builder, &page).is_ok());
    }

    #[test]
    fn inverted_window_is_rejected_before_rendering() {
        assert!(matches!(
            render(&PageQuery::window(9, 3)),
            Err(DalError::InvalidPage(_))
        ));
    }
}
