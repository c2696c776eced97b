//! Connection pool construction and schema setup.

use super::{Config, DalError};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Opens a pool sized and timed by `config`
pub async fn connect(config: &Config) -> Result<PgPool, DalError> {
    info!(
        max_connections = config.max_connections,
        "Connecting to database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Applies the scripts under `./migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), DalError> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
