//! StrategyRepository

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Strategy;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type StrategyRepository<C = PgPool> = Repository<Strategy, C>;

impl<C: Connector> Repository<Strategy, C> {
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Strategy>, DalError> {
        debug!("Finding strategy by name");
        self.find_one_by("name", name.into()).await
    }
}
