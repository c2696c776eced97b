//! Query DTOs - paginated and filtered list requests

use crate::core::DalError;
use crate::repositories::filter::{Joiner, Predicate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order `{}`", other)),
        }
    }
}

/// A page of rows: `_start`/`_end` window, `_sort`/`_order`, plus filters.
///
/// The window applies only when both `start` and `end` are positive; the
/// page then holds rows `start..end` (`OFFSET start LIMIT end - start`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct PageQuery {
    #[serde(rename = "_start", default)]
    #[validate(range(min = 0, message = "_start must not be negative"))]
    pub start: Option<i64>,

    #[serde(rename = "_end", default)]
    #[validate(range(min = 0, message = "_end must not be negative"))]
    pub end: Option<i64>,

    #[serde(rename = "_sort", default)]
    pub sort: Option<String>,

    #[serde(rename = "_order", default)]
    pub order: Option<SortOrder>,

    #[serde(default)]
    pub joiner: Joiner,

    #[serde(skip)]
    pub filters: Vec<Predicate>,
}

impl PageQuery {
    pub fn window(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(column.into());
        self.order = Some(order);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn joined_by(mut self, joiner: Joiner) -> Self {
        self.joiner = joiner;
        self
    }

    /// Field ranges first, then the window as a whole
    pub fn check(&self) -> Result<(), DalError> {
        self.validate()?;
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > 0 && end > 0 && end < start {
                return Err(DalError::InvalidPage(format!(
                    "_end ({}) must not be lower than _start ({})",
                    end, start
                )));
            }
        }
        Ok(())
    }

    /// `(offset, limit)` when both bounds are positive
    pub fn offset_limit(&self) -> Option<(i64, i64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > 0 && end > 0 => Some((start, end - start)),
            _ => None,
        }
    }
}
