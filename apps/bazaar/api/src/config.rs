use core_config::{app_info, jwt::JwtConfig, server::ServerConfig, AppInfo, FromEnv};

use database::postgres::PostgresConfig;
use database::redis::RedisConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Unset REDIS_HOST means the search cache runs local-only.
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let redis = RedisConfig::from_env_optional();
        let jwt = JwtConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            redis,
            jwt,
            server,
            environment,
        })
    }
}
