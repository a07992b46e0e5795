//! Authentication Service
//!
//! HS256 bearer tokens. The claims carry everything the permission gate
//! needs (id, username, role), so resolving a `Principal` from a request
//! costs no storage read.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Principal, PrincipalRole, User};
use crate::error::{PlatformError, Result};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            issuer: "campuslink".to_string(),
            access_token_expiry_secs: 3600,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: String,
    pub username: String,
    pub role: PrincipalRole,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct AuthService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: if user.admin {
                PrincipalRole::Admin
            } else {
                PrincipalRole::Member
            },
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.access_token_expiry_secs)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| PlatformError::internal(format!("token signing failed: {e}")))
    }

    /// Validate a bearer token and resolve the request principal.
    pub fn validate_token(&self, token: &str) -> Result<Principal> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            PlatformError::InvalidToken {
                message: e.to_string(),
            }
        })?;

        Ok(Principal::new(
            data.claims.sub,
            data.claims.username,
            data.claims.role,
        ))
    }
}

/// Pull the token out of an `Authorization: Bearer ...` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn issued_tokens_validate_back_to_the_principal() {
        let service = service();
        let user = User::new("alice", "hash").with_admin(true);
        let token = service.issue_token(&user).unwrap();

        let principal = service.validate_token(&token).unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username, "alice");
        assert!(principal.is_admin());
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let service = service();
        let user = User::new("alice", "hash");
        let mut token = service.issue_token(&user).unwrap();
        token.push('x');
        assert!(matches!(
            service.validate_token(&token),
            Err(PlatformError::InvalidToken { .. })
        ));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
    }
}
