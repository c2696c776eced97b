//! JobRepository - scheduled jobs and their last response

use super::{Connector, Repository};
use crate::core::DalError;
use crate::entities::Job;
use sqlx::PgPool;
use tracing::{debug, instrument};

pub type JobRepository<C = PgPool> = Repository<Job, C>;

impl<C: Connector> Repository<Job, C> {
    /// Every job registered by one application
    #[instrument(skip(self))]
    pub async fn find_by_application(&self, application_name: &str) -> Result<Vec<Job>, DalError> {
        debug!("Finding jobs by application");
        self.find_all_by("application_name", application_name.into(), Some("job_id"))
            .await
    }
}
