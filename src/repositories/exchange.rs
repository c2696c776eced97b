//! ExchangeRepository - venues grouped by the chain they settle on

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Exchange;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type ExchangeRepository<C = PgPool> = Repository<Exchange, C>;

impl<C: Connector> Repository<Exchange, C> {
    #[instrument(skip(self))]
    pub async fn find_by_chain(&self, chain_id: i32) -> Result<Vec<Exchange>, DalError> {
        debug!("Finding exchanges by chain");
        self.find_all_by("chain_id", chain_id.into(), Some("exchange_id"))
            .await
    }
}
