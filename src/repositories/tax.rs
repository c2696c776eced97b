//! TaxRepository

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Tax;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type TaxRepository<C = PgPool> = Repository<Tax, C>;

impl<C: Connector> Repository<Tax, C> {
    #[instrument(skip(self))]
    pub async fn find_by_jurisdiction(&self, tax_jurisdiction: &str) -> Result<Vec<Tax>, DalError> {
        debug!("Finding taxes by jurisdiction");
        self.find_all_by("tax_jurisdiction", tax_jurisdiction.into(), Some("tax_id"))
            .await
    }
}
