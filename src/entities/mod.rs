//! Entities module - one record type per table
//!
//! Each entity mirrors its table: nullable columns are `Option`, the audit
//! block is flattened in both JSON and row form, and the [`Entity`] impl
//! carries the column mapping the generic repository builds SQL from.

pub mod audit;
pub mod schema;
pub mod value;

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
pub use audit::{Audit, SYSTEM_ACTOR};
pub use schema::{AUDIT_COLUMNS, Entity, EntityKey, ValidityWindow};
pub use value::SqlValue;

pub use asset::Asset;
pub use chain::Chain;
pub use exchange::Exchange;
pub use job::Job;
pub use pool::Pool;
pub use status::Status;
pub use step::Step;
pub use strategy::Strategy;
pub use strategy_job::StrategyJob;
pub use tax::Tax;
pub use transaction::Transaction;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_list_covers_keys_uuid_data_and_audit() {
        let columns = StrategyJob::all_columns();
        assert_eq!(
            columns,
            vec![
                "strategy_id",
                "job_id",
                "uuid",
                "description",
                "status_id",
                "start_date",
                "end_date",
                "created_by",
                "created_at",
                "updated_by",
                "updated_at",
            ]
        );
    }

    #[test]
    fn values_line_up_with_columns() {
        assert_eq!(Pool::default().values().len(), Pool::COLUMNS.len());
        assert_eq!(Job::default().values().len(), Job::COLUMNS.len());
        assert_eq!(Tax::default().values().len(), Tax::COLUMNS.len());
        assert_eq!(Step::default().values().len(), Step::COLUMNS.len());
        assert_eq!(Transaction::default().values().len(), Transaction::COLUMNS.len());
        assert_eq!(Asset::default().values().len(), Asset::COLUMNS.len());
        assert_eq!(Chain::default().values().len(), Chain::COLUMNS.len());
    }

    #[test]
    fn audit_is_flattened_in_json() {
        let status = Status {
            status_id: 3,
            name: "ACTIVE".to_string(),
            audit: Audit::by("loader"),
            ..Status::default()
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["created_by"], "loader");
        assert_eq!(json["status_id"], 3);
        assert!(json.get("audit").is_none());
    }
}
