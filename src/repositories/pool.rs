//! PoolRepository - liquidity pools by exchange or on-chain address

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Pool;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type PoolRepository<C = PgPool> = Repository<Pool, C>;

impl<C: Connector> Repository<Pool, C> {
    #[instrument(skip(self))]
    pub async fn find_by_exchange(&self, exchange_id: i32) -> Result<Vec<Pool>, DalError> {
        debug!("Finding pools by exchange");
        self.find_all_by("exchange_id", exchange_id.into(), Some("pool_id"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_address(&self, pool_address: &str) -> Result<Option<Pool>, DalError> {
        debug!("Finding pool by address");
        self.find_one_by("pool_address", pool_address.into()).await
    }
}
