//! TransactionRepository - on-chain transfers

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Transaction;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type TransactionRepository<C = PgPool> = Repository<Transaction, C>;

impl<C: Connector> Repository<Transaction, C> {
    #[instrument(skip(self))]
    pub async fn find_by_hash(&self, tx_hash: &str) -> Result<Option<Transaction>, DalError> {
        debug!("Finding transaction by hash");
        self.find_one_by("tx_hash", tx_hash.into()).await
    }

    /// Newest blocks first
    #[instrument(skip(self))]
    pub async fn find_by_chain(&self, chain_id: i32) -> Result<Vec<Transaction>, DalError> {
        debug!("Finding transactions by chain");
        self.find_all_by("chain_id", chain_id.into(), Some("block_number DESC"))
            .await
    }
}
