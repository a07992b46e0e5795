//! Principal - the authenticated actor for one request
//!
//! Resolved once per request from the bearer token claims, with no extra
//! storage reads. Request-scoped: never cached or shared across requests.

use serde::{Deserialize, Serialize};

/// Coarse role carried in the token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalRole {
    /// Platform operator with manage access on every subject type.
    Admin,
    /// Regular signed-in user.
    Member,
}

impl Default for PrincipalRole {
    fn default() -> Self {
        Self::Member
    }
}

/// Authenticated actor issuing the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// User id the token was issued for.
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: PrincipalRole,
}

impl Principal {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: PrincipalRole) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role,
        }
    }

    pub fn member(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(id, username, PrincipalRole::Member)
    }

    pub fn admin(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(id, username, PrincipalRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == PrincipalRole::Admin
    }
}
