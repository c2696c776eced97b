use ledger_dal::Store;
use sqlx::PgPool;
use std::time::Duration;

/// Builds a Store for tests, with a short query timeout
///
/// # Arguments
/// * `pool` - Connection pool created by `sqlx::test`
pub fn create_test_store(pool: PgPool) -> Store {
    ledger_dal::init_tracing("debug");
    Store::with_timeout(pool, Duration::from_secs(30))
}
