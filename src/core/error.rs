//! Error type shared by every repository operation.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DalError {
    /// Connection, syntax, constraint or any other driver-level failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The returned column set does not match the target struct
    #[error("row mapping error: {0}")]
    RowMapping(#[source] sqlx::Error),

    #[error("{table}: primary key must be set and non-zero")]
    MissingKey { table: &'static str },

    #[error("{table}: unknown column `{column}`")]
    UnknownColumn { table: &'static str, column: String },

    #[error("invalid page request: {0}")]
    InvalidPage(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("{table}: query exceeded {timeout:?}")]
    Timeout {
        table: &'static str,
        timeout: Duration,
    },

    /// The statement failed and so did the rollback that followed it
    #[error("{source}; rollback also failed: {rollback}")]
    RollbackFailed {
        #[source]
        source: sqlx::Error,
        rollback: sqlx::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DalError {
    pub fn is_row_mapping(&self) -> bool {
        matches!(self, DalError::RowMapping(_))
    }
}

impl From<sqlx::Error> for DalError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => Self::RowMapping(err),
            _ => Self::Database(err),
        }
    }
}

impl From<validator::ValidationErrors> for DalError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidPage(err.to_string())
    }
}
