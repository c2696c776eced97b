//! Exchange entity - a venue (DEX or CEX) living on a chain

use super::{Audit, Entity, SqlValue, ValidityWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Exchange {
    pub exchange_id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub chain_id: Option<i32>,
    pub status_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Exchange {
    type Key = i32;

    const TABLE: &'static str = "exchanges";
    const KEY_COLUMNS: &'static [&'static str] = &["exchange_id"];
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "alternate_name",
        "description",
        "chain_id",
        "status_id",
        "start_date",
        "end_date",
    ];

    fn key(&self) -> i32 {
        self.exchange_id
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
            self.chain_id.into(),
            self.status_id.into(),
            self.start_date.into(),
            self.end_date.into(),
        ]
    }
}

impl ValidityWindow for Exchange {}
