use super::DalError;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Upper bound applied to every database call unless overridden
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub query_timeout_secs: u64,
    pub app_env: String,
    pub log_level: String,
}

impl Config {
    /// Loads the configuration from environment variables.
    /// Calls dotenv() first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, DalError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| DalError::Config("DATABASE_URL must be set".to_string()))?;

        Ok(Config {
            database_url,
            max_connections: parse_var("MAX_DB_CONNECTIONS", 10)?,
            connection_lifetime_secs: parse_var("DB_CONNECTION_LIFETIME_SECS", 1800)?,
            acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", 30)?,
            query_timeout_secs: parse_var("DB_QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS)?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Logs the configuration, hiding the database credentials
    pub fn print_info(&self) {
        info!(
            env = %self.app_env,
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            connection_lifetime_secs = self.connection_lifetime_secs,
            query_timeout_secs = self.query_timeout_secs,
            "data access configuration loaded"
        );
    }

    /// Masks everything between the scheme and the host
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.rfind('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, DalError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| DalError::Config(format!("invalid {}: `{}`", name, raw))),
        Err(_) => Ok(default),
    }
}
