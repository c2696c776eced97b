//! StrategyJob entity - links a job to the strategy it runs
//!
//! Keyed by the `(strategy_id, job_id)` pair; both halves come from the
//! caller, only the uuid is generated on insert.

use super::{Audit, Entity, SqlValue, ValidityWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct StrategyJob {
    pub strategy_id: i32,
    pub job_id: i32,
    pub uuid: Uuid,
    pub description: Option<String>,
    pub status_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for StrategyJob {
    type Key = (i32, i32);

    const TABLE: &'static str = "strategy_jobs";
    const KEY_COLUMNS: &'static [&'static str] = &["strategy_id", "job_id"];
    const COLUMNS: &'static [&'static str] = &["description", "status_id", "start_date", "end_date"];
    const GENERATED_KEY: bool = false;

    fn key(&self) -> (i32, i32) {
        (self.strategy_id, self.job_id)
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.description.clone().into(),
            self.status_id.into(),
            self.start_date.into(),
            self.end_date.into(),
        ]
    }
}

impl ValidityWindow for StrategyJob {}
