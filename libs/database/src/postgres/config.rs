use core_config::{ConfigError, FromEnv};
use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

/// PostgreSQL connection pool configuration
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 50,
            min_connections: 5,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: true,
        }
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Info);
        opt
    }
}

impl From<core_config::database::DatabaseConfig> for PostgresConfig {
    fn from(config: core_config::database::DatabaseConfig) -> Self {
        Self::new(config.url)
    }
}

impl FromEnv for PostgresConfig {
    /// Requires DATABASE_URL; pool sizing is tunable through
    /// DB_MAX_CONNECTIONS and DB_MIN_CONNECTIONS.
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(core_config::env_required("DATABASE_URL")?);

        config.max_connections = parse_env("DB_MAX_CONNECTIONS", config.max_connections)?;
        config.min_connections = parse_env("DB_MIN_CONNECTIONS", config.min_connections)?;

        Ok(config)
    }
}

fn parse_env(key: &str, default: u32) -> Result<u32, ConfigError> {
    match core_config::env_optional(key) {
        Some(raw) => raw.parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_defaults() {
        let config = PostgresConfig::new("postgres://localhost/bazaar");
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 5);
        assert!(config.sqlx_logging);
    }

    #[test]
    fn test_postgres_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/bazaar")),
                ("DB_MAX_CONNECTIONS", Some("10")),
                ("DB_MIN_CONNECTIONS", None::<&str>),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.url, "postgres://localhost/bazaar");
                assert_eq!(config.max_connections, 10);
                assert_eq!(config.min_connections, 5);
            },
        );
    }

    #[test]
    fn test_postgres_config_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/bazaar")),
                ("DB_MAX_CONNECTIONS", Some("many")),
            ],
            || {
                let result = PostgresConfig::from_env();
                assert!(result.is_err());
            },
        );
    }
}
