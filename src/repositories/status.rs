//! StatusRepository - lookup table of lifecycle states

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Status;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type StatusRepository<C = PgPool> = Repository<Status, C>;

impl<C: Connector> Repository<Status, C> {
    /// Status names are unique, so at most one row comes back
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Status>, DalError> {
        debug!("Finding status by name");
        self.find_one_by("name", name.into()).await
    }
}
