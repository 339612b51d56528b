//! Authentication and authorization module.
//!
//! This module provides:
//! - JWT bearer token verification
//! - Authentication middleware that attaches the caller to request extensions
//! - Role types and the `AuthUser` extractor for handlers
//!
//! Token issuance lives with the identity provider; services only verify.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{authenticate, AuthUser, JwtVerifier};
//! use core_config::{jwt::JwtConfig, FromEnv};
//!
//! let verifier = JwtVerifier::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/orders", get(list_orders))
//!     .layer(axum::middleware::from_fn_with_state(verifier, authenticate));
//!
//! async fn list_orders(user: AuthUser) -> String {
//!     format!("orders for {}", user.id)
//! }
//! ```

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Caller role carried in the JWT `role` claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // Caller role
    pub exp: i64,     // Expiration time
    pub iss: String,  // Issuer
}

/// Stateless JWT verifier shared across protected routes.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &core_config::jwt::JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify token signature, expiry and issuer, and decode claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Authenticated caller, extracted from request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }

    /// Whether the caller may act on a resource owned by `owner_id`.
    ///
    /// Admins may act on anyone's resources; everyone else only on their own.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.id == owner_id
    }

    /// Returns 403 unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// Returns 403 unless the caller is a seller or admin.
    pub fn require_seller(&self) -> Result<(), AppError> {
        if self.is_seller() || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Seller access required".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::Unauthorized("Authentication required".to_string()).into_response()
            })
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthUser>().cloned())
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// JWT authentication middleware.
///
/// Verifies the bearer token and inserts an [`AuthUser`] into request
/// extensions on success. Handlers opt in by taking `AuthUser` as an
/// extractor argument.
pub async fn authenticate(
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err(
                AppError::Unauthorized("No token provided".to_string()).into_response()
            );
        }
    };

    let claims = match verifier.verify(token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()).into_response());
        }
    };

    let id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::debug!("JWT subject is not a UUID: {}", claims.sub);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    let role = Role::from_str(&claims.role).map_err(|_| {
        tracing::debug!("Unknown role in JWT: {}", claims.role);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    request.extensions_mut().insert(AuthUser { id, role });
    Ok(next.run(request).await)
}

/// Like [`authenticate`], but anonymous requests pass through.
///
/// A present-but-invalid token is still rejected; handlers see the caller
/// as `Option<AuthUser>`.
pub async fn authenticate_optional(
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(token) = extract_bearer_token(&headers) {
        let claims = verifier.verify(token).map_err(|e| {
            tracing::debug!("JWT verification failed: {}", e);
            AppError::Unauthorized("Invalid token".to_string()).into_response()
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            AppError::Unauthorized("Invalid token".to_string()).into_response()
        })?;
        let role = Role::from_str(&claims.role).map_err(|_| {
            AppError::Unauthorized("Invalid token".to_string()).into_response()
        })?;

        request.extensions_mut().insert(AuthUser { id, role });
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_verifier(secret: &str, issuer: &str) -> JwtVerifier {
        JwtVerifier::new(&core_config::jwt::JwtConfig {
            secret: secret.to_string(),
            issuer: issuer.to_string(),
        })
    }

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims(role: &str) -> JwtClaims {
        JwtClaims {
            sub: Uuid::now_v7().to_string(),
            role: role.to_string(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
            iss: "bazaar".to_string(),
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = test_verifier("secret", "bazaar");
        let token = sign(&valid_claims("admin"), "secret");

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let verifier = test_verifier("secret", "bazaar");
        let token = sign(&valid_claims("user"), "other-secret");

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_issuer() {
        let verifier = test_verifier("secret", "bazaar");
        let mut claims = valid_claims("user");
        claims.iss = "someone-else".to_string();
        let token = sign(&claims, "secret");

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = test_verifier("secret", "bazaar");
        let mut claims = valid_claims("user");
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = sign(&claims, "secret");

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("seller").unwrap(), Role::Seller);
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_can_access() {
        let owner = Uuid::now_v7();
        let admin = AuthUser {
            id: Uuid::now_v7(),
            role: Role::Admin,
        };
        let stranger = AuthUser {
            id: Uuid::now_v7(),
            role: Role::User,
        };
        let owner_user = AuthUser {
            id: owner,
            role: Role::User,
        };

        assert!(admin.can_access(owner));
        assert!(owner_user.can_access(owner));
        assert!(!stranger.can_access(owner));
    }

    #[test]
    fn test_require_seller_allows_admin() {
        let admin = AuthUser {
            id: Uuid::now_v7(),
            role: Role::Admin,
        };
        assert!(admin.require_seller().is_ok());

        let user = AuthUser {
            id: Uuid::now_v7(),
            role: Role::User,
        };
        assert!(user.require_seller().is_err());
    }
}
