//! Pool entity - a liquidity pool listed on an exchange

use super::{Audit, Entity, SqlValue, ValidityWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Pool {
    pub pool_id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub pool_address: Option<String>,
    pub exchange_id: Option<i32>,
    pub chain_id: Option<i32>,
    pub token0_asset_id: Option<i32>,
    pub token1_asset_id: Option<i32>,
    /// Fee in hundredths of a basis point (3000 = 0.30%)
    pub fee_tier: Option<i32>,
    pub status_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Pool {
    type Key = i32;

    const TABLE: &'static str = "pools";
    const KEY_COLUMNS: &'static [&'static str] = &["pool_id"];
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "alternate_name",
        "description",
        "pool_address",
        "exchange_id",
        "chain_id",
        "token0_asset_id",
        "token1_asset_id",
        "fee_tier",
        "status_id",
        "start_date",
        "end_date",
    ];

    fn key(&self) -> i32 {
        self.pool_id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.alternate_name.clone().into(),
            self.description.clone().into(),
            self.pool_address.clone().into(),
            self.exchange_id.into(),
            self.chain_id.into(),
            self.token0_asset_id.into(),
            self.token1_asset_id.into(),
            self.fee_tier.into(),
            self.status_id.into(),
            self.start_date.into(),
            self.end_date.into(),
        ]
    }
}

impl ValidityWindow for Pool {}
