//! ledger-dal - typed Postgres data access for the ledger tables
//!
//! Each table has an entity in [`entities`] and a repository alias in
//! [`repositories`]; [`core::Store`] bundles all of them over one pool.

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;

// Re-exports for shorter imports
pub use crate::core::{Config, DalError, Store, init_tracing};
pub use dtos::{PageQuery, SortOrder};
pub use repositories::{
    BulkCreate, Connector, Count, Create, Delete, Inserted, Paginate, Predicate, Read, ReadAll,
    ReadByUuid, ReadMany, Repository, SharedConnection, Update,
};
