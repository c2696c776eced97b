//! Core module - infrastructure shared by every repository
//!
//! - Configuration loaded from the environment
//! - Pool construction and migrations
//! - Error type
//! - Tracing setup
//! - Store holding one repository per entity

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod state;

pub use config::Config;
pub use error::DalError;
pub use logging::init_tracing;
pub use state::Store;
