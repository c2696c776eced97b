//! Step entity - one action of a strategy

use super::{Audit, Entity, SqlValue, ValidityWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Step {
    pub step_id: i32,
    pub uuid: Uuid,
    pub strategy_id: Option<i32>,
    /// Position within the strategy, ascending
    pub step_order: Option<i32>,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub pool_id: Option<i32>,
    pub asset_id: Option<i32>,
    pub status_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Step {
    type Key = i32;

    const TABLE: &'static str = "steps";
    const KEY_COLUMNS: &'static [&'static str] = &["step_id"];
    const COLUMNS: &'static [&'static str] = &[
        "strategy_id",
        "step_order",
        "name",
        "alternate_name",
        "description",
        "pool_id",
        "asset_id",
        "status_id",
        "start_date",
        "end_date",
    ];

    fn key(&self) -> i32 {
        self.step_id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.strategy_id.into(),
            self.step_order.into(),
            self.name.clone().into(),
            self.alternate_name.clone().into(),
            self.description.clone().into(),
            self.pool_id.into(),
            self.asset_id.into(),
            self.status_id.into(),
            self.start_date.into(),
            self.end_date.into(),
        ]
    }
}

impl ValidityWindow for Step {}
