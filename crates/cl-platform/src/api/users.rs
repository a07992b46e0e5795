//! Users API
//!
//! The response DTO deliberately omits the password hash; user listings
//! require a signed-in principal per policy.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::User;
use crate::error::PlatformError;
use crate::service::user::UpdateUserInput;
use crate::service::UserService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub follower_counter: i64,
    pub following_counter: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
            email: u.email,
            follower_counter: u.follower_counter,
            following_counter: u.following_counter,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Clone)]
pub struct UsersState {
    pub user_service: Arc<UserService>,
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<UsersState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, PlatformError> {
    let user = state.user_service.get_by_id(auth.principal(), &id).await?;
    Ok(Json(user.into()))
}

/// List users as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    params(ConnectionParams),
    responses((status = 200, description = "Connection of users")),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<UsersState>,
    Authenticated(principal): Authenticated,
    Query(page): Query<ConnectionParams>,
) -> Result<Json<Connection<UserResponse>>, PlatformError> {
    let connection = state
        .user_service
        .list(Some(&principal), &page.into())
        .await?;
    Ok(Json(connection.map(UserResponse::from)))
}

/// Update a user (self-service or admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<UsersState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<UserResponse>, PlatformError> {
    let user = state
        .user_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(user.into()))
}

/// Delete a user (admin only per policy)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, PlatformError> {
    let user = state.user_service.delete(Some(&principal), &id).await?;
    Ok(Json(user.into()))
}

pub fn users_router(state: UsersState) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}
