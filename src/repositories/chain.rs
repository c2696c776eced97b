//! ChainRepository

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Chain;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type ChainRepository<C = PgPool> = Repository<Chain, C>;

impl<C: Connector> Repository<Chain, C> {
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Chain>, DalError> {
        debug!("Finding chain by name");
        self.find_one_by("name", name.into()).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, chain_code: &str) -> Result<Option<Chain>, DalError> {
        debug!("Finding chain by code");
        self.find_one_by("chain_code", chain_code.into()).await
    }
}
