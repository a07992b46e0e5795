//! Auth API
//!
//! Registration and login issuing bearer tokens.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::users::UserResponse;
use crate::error::PlatformError;
use crate::service::user::RegisterUserInput;
use crate::service::{AuthService, UserService};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterUserInput,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 409, description = "Username taken")
    )
)]
pub async fn register(
    State(state): State<AuthApiState>,
    Json(input): Json<RegisterUserInput>,
) -> Result<Json<TokenResponse>, PlatformError> {
    let user = state.user_service.register(input).await?;
    let access_token = state.auth_service.issue_token(&user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    }))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, PlatformError> {
    let user = state
        .user_service
        .authenticate(&req.username, &req.password)
        .await?;
    let access_token = state.auth_service.issue_token(&user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    }))
}

pub fn auth_router(state: AuthApiState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}
