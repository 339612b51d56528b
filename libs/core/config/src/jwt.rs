use crate::{env_or_default, env_required, ConfigError, FromEnv};

/// JWT verification configuration for the role guard.
///
/// Token issuance lives outside this service; the API only verifies
/// bearer tokens signed with the shared secret.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: String, issuer: String) -> Self {
        Self { secret, issuer }
    }
}

impl FromEnv for JwtConfig {
    /// Requires JWT_SECRET; JWT_ISSUER defaults to "bazaar"
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env_required("JWT_SECRET")?,
            issuer: env_or_default("JWT_ISSUER", "bazaar"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_from_env_success() {
        temp_env::with_vars(
            [("JWT_SECRET", Some("s3cret")), ("JWT_ISSUER", None::<&str>)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, "s3cret");
                assert_eq!(config.issuer, "bazaar");
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let config = JwtConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_custom_issuer() {
        temp_env::with_vars(
            [("JWT_SECRET", Some("s3cret")), ("JWT_ISSUER", Some("shop"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.issuer, "shop");
            },
        );
    }
}
