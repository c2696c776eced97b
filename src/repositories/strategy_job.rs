//! StrategyJobRepository - strategy to job links
//!
//! Rows are keyed by `(strategy_id, job_id)`; both finders return the
//! links ordered by the other half of the key.

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::StrategyJob;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type StrategyJobRepository<C = PgPool> = Repository<StrategyJob, C>;

impl<C: Connector> Repository<StrategyJob, C> {
    #[instrument(skip(self))]
    pub async fn find_by_strategy(&self, strategy_id: i32) -> Result<Vec<StrategyJob>, DalError> {
        debug!("Finding jobs linked to strategy");
        self.find_all_by("strategy_id", strategy_id.into(), Some("job_id"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_job(&self, job_id: i32) -> Result<Vec<StrategyJob>, DalError> {
        debug!("Finding strategies linked to job");
        self.find_all_by("job_id", job_id.into(), Some("strategy_id"))
            .await
    }
}
