//! AssetRepository

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Asset;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type AssetRepository<C = PgPool> = Repository<Asset, C>;

impl<C: Connector> Repository<Asset, C> {
    #[instrument(skip(self))]
    pub async fn find_by_chain(&self, chain_id: i32) -> Result<Vec<Asset>, DalError> {
        debug!("Finding assets by chain");
        self.find_all_by("chain_id", chain_id.into(), Some("asset_id"))
            .await
    }

    /// The same symbol can exist on several chains
    #[instrument(skip(self))]
    pub async fn find_by_symbol(&self, symbol: &str) -> Result<Vec<Asset>, DalError> {
        debug!("Finding assets by symbol");
        self.find_all_by("symbol", symbol.into(), Some("asset_id"))
            .await
    }
}
