use crate::{env_optional, env_required, ConfigError, FromEnv};

/// Redis configuration for the shared cache tier
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    /// Load from the environment, treating an unset or blank REDIS_HOST as
    /// "not configured". The cache then runs local-only.
    pub fn from_env_optional() -> Option<Self> {
        env_optional("REDIS_HOST").map(Self::new)
    }
}

impl FromEnv for RedisConfig {
    /// Requires REDIS_HOST to be set (no default)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("REDIS_HOST")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_config_from_env_success() {
        temp_env::with_var("REDIS_HOST", Some("redis://localhost:6379"), || {
            let config = RedisConfig::from_env();
            assert!(config.is_ok());
            assert_eq!(config.unwrap().url, "redis://localhost:6379");
        });
    }

    #[test]
    fn test_redis_config_from_env_missing() {
        temp_env::with_var_unset("REDIS_HOST", || {
            let config = RedisConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("REDIS_HOST"));
        });
    }

    #[test]
    fn test_redis_config_optional_unset() {
        temp_env::with_var_unset("REDIS_HOST", || {
            assert!(RedisConfig::from_env_optional().is_none());
        });
    }

    #[test]
    fn test_redis_config_optional_set() {
        temp_env::with_var("REDIS_HOST", Some("redis://cache:6379"), || {
            let config = RedisConfig::from_env_optional();
            assert!(config.is_some());
            assert_eq!(config.unwrap().url, "redis://cache:6379");
        });
    }
}
