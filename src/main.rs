use ledger_dal::core::db;
use ledger_dal::{Config, Store, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);
    config.print_info();

    let pool = db::connect(&config).await?;

    if std::env::var("RUN_MIGRATIONS").is_ok_and(|value| value == "true") {
        db::run_migrations(&pool).await?;
    }

    let store = Store::new(pool, &config);
    match store.table_counts().await {
        Ok(counts) => {
            for (table, rows) in counts {
                info!(table, rows, "Table count");
            }
        }
        Err(err) => {
            error!(error = %err, "Could not count tables");
            return Err(err.into());
        }
    }

    Ok(())
}
