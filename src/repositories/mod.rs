//! Repositories module - one generic repository, aliased per entity
//!
//! [`Repository`] carries every operation and runs it on a [`Connector`];
//! each sub-module names the alias for its entity and adds the finders
//! specific to that table.

pub mod connector;
mod copy;
pub mod filter;
mod repository;
pub mod traits;

pub mod asset;
pub mod chain;
pub mod exchange;
pub mod job;
pub mod pool;
pub mod status;
pub mod step;
pub mod strategy;
pub mod strategy_job;
pub mod tax;
pub mod transaction;

// Re-exports for shorter imports
pub use connector::{Connector, SharedConnection};
pub use filter::{CompareOp, Joiner, Predicate};
pub use repository::Repository;
pub use traits::{
    BulkCreate, Count, Create, Delete, Inserted, Paginate, Read, ReadAll, ReadByUuid, ReadMany,
    Update,
};

pub use asset::AssetRepository;
pub use chain::ChainRepository;
pub use exchange::ExchangeRepository;
pub use job::JobRepository;
pub use pool::PoolRepository;
pub use status::StatusRepository;
pub use step::StepRepository;
pub use strategy::StrategyRepository;
pub use strategy_job::StrategyJobRepository;
pub use tax::TaxRepository;
pub use transaction::TransactionRepository;
