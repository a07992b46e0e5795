//! API Middleware
//!
//! Authentication extractors for Axum. The principal is resolved from the
//! bearer token once per request and passed explicitly into services; there
//! is no ambient request state.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::api::common::ApiError;
use crate::domain::Principal;
use crate::service::{extract_bearer_token, AuthService};

/// Shared state for the auth extractors, attached as an Extension.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

fn unauthorized(message: &str) -> Response {
    let error = ApiError::new("UNAUTHORIZED", message);
    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for endpoints that require a signed-in principal.
pub struct Authenticated(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = extract_bearer_token(auth_header)
            .ok_or_else(|| unauthorized("Invalid Authorization header format"))?;

        let app_state = parts.extensions.get::<AppState>().ok_or_else(|| {
            let error = ApiError::new("INTERNAL_ERROR", "AppState not found");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        })?;

        let principal = app_state
            .auth_service
            .validate_token(token)
            .map_err(|e| e.into_response())?;

        Ok(Authenticated(principal))
    }
}

/// Extractor for endpoints that serve anonymous callers too. A malformed or
/// invalid token degrades to anonymous instead of failing the request.
pub struct OptionalAuth(pub Option<Principal>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = match parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(h) => h,
            None => return Ok(OptionalAuth(None)),
        };

        let token = match extract_bearer_token(auth_header) {
            Some(t) => t,
            None => return Ok(OptionalAuth(None)),
        };

        let app_state = match parts.extensions.get::<AppState>() {
            Some(s) => s,
            None => return Ok(OptionalAuth(None)),
        };

        match app_state.auth_service.validate_token(token) {
            Ok(principal) => Ok(OptionalAuth(Some(principal))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

impl OptionalAuth {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}
