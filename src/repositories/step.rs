//! StepRepository

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Step;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type StepRepository<C = PgPool> = Repository<Step, C>;

impl<C: Connector> Repository<Step, C> {
    /// Steps of one strategy in execution order
    #[instrument(skip(self))]
    pub async fn find_by_strategy(&self, strategy_id: i32) -> Result<Vec<Step>, DalError> {
        debug!("Finding steps by strategy");
        self.find_all_by("strategy_id", strategy_id.into(), Some("step_order"))
            .await
    }
}
