//! Transaction entity - an on-chain transfer identified by its hash

use super::{Audit, Entity, SqlValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Transaction {
    pub transaction_id: i32,
    pub uuid: Uuid,
    /// 0x-prefixed hex hash as reported by the chain
    pub tx_hash: String,
    pub chain_id: Option<i32>,
    pub block_number: Option<i64>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub asset_id: Option<i32>,
    pub amount: Option<Decimal>,
    pub fee: Option<Decimal>,
    pub description: Option<String>,
    pub status_id: Option<i32>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Transaction {
    type Key = i32;

    const TABLE: &'static str = "transactions";
    const KEY_COLUMNS: &'static [&'static str] = &["transaction_id"];
    const COLUMNS: &'static [&'static str] = &[
        "tx_hash",
        "chain_id",
        "block_number",
        "from_address",
        "to_address",
        "asset_id",
        "amount",
        "fee",
        "description",
        "status_id",
    ];

    fn key(&self) -> i32 {
        self.transaction_id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.tx_hash.clone().into(),
            self.chain_id.into(),
            self.block_number.into(),
            self.from_address.clone().into(),
            self.to_address.clone().into(),
            self.asset_id.into(),
            self.amount.into(),
            self.fee.into(),
            self.description.clone().into(),
            self.status_id.into(),
        ]
    }
}
