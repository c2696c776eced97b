//! DTOs module - request shapes shared by the repositories

pub mod query;

pub use query::{PageQuery, SortOrder};
