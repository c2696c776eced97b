//! Chain entity - a blockchain network

use super::{Audit, Entity, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Chain {
    pub chain_id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    // short code such as "eth" or "arb"
    pub chain_code: Option<String>,
    pub native_symbol: Option<String>,
    pub rpc_url: Option<String>,
    pub status_id: Option<i32>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Chain {
    type Key = i32;

    const TABLE: &'static str = "chains";
    const KEY_COLUMNS: &'static [&'static str] = &["chain_id"];
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "alternate_name",
        "description",
        "chain_code",
        "native_symbol",
        "rpc_url",
        "status_id",
    ];

    fn key(&self) -> i32 {
        self.chain_id
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
            self.chain_code.clone().into(),
            self.native_symbol.clone().into(),
            self.rpc_url.clone().into(),
            self.status_id.into(),
        ]
    }
}
