//! Followers API
//!
//! Follow/unfollow act on behalf of the signed-in principal; the edge's
//! `user` field is never taken from the request body.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::Follower;
use crate::error::PlatformError;
use crate::service::FollowerService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowerResponse {
    pub id: String,
    pub user: String,
    pub resource_name: String,
    pub resource_id: String,
    pub created_at: String,
}

impl From<Follower> for FollowerResponse {
    fn from(f: Follower) -> Self {
        Self {
            id: f.id,
            user: f.user,
            resource_name: f.resource_name,
            resource_id: f.resource_id,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub resource_name: String,
    pub resource_id: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FollowersQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub resource_name: Option<String>,
    pub resource_id: Option<String>,
}

#[derive(Clone)]
pub struct FollowersState {
    pub follower_service: Arc<FollowerService>,
}

/// Follow a resource
#[utoipa::path(
    post,
    path = "",
    tag = "followers",
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Edge created", body = FollowerResponse),
        (status = 400, description = "Resource type not followable"),
        (status = 409, description = "Already following")
    ),
    security(("bearer_auth" = []))
)]
pub async fn follow(
    State(state): State<FollowersState>,
    Authenticated(principal): Authenticated,
    Json(request): Json<FollowRequest>,
) -> Result<Json<FollowerResponse>, PlatformError> {
    let edge = state
        .follower_service
        .follow(&principal, &request.resource_name, &request.resource_id)
        .await?;
    Ok(Json(edge.into()))
}

/// Unfollow a resource
#[utoipa::path(
    post,
    path = "/unfollow",
    tag = "followers",
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Edge removed", body = FollowerResponse),
        (status = 404, description = "Not following")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unfollow(
    State(state): State<FollowersState>,
    Authenticated(principal): Authenticated,
    Json(request): Json<FollowRequest>,
) -> Result<Json<FollowerResponse>, PlatformError> {
    let edge = state
        .follower_service
        .unfollow(&principal, &request.resource_name, &request.resource_id)
        .await?;
    Ok(Json(edge.into()))
}

/// List follow edges as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "followers",
    params(FollowersQuery),
    responses((status = 200, description = "Connection of follow edges")),
    security(("bearer_auth" = []))
)]
pub async fn list_followers(
    State(state): State<FollowersState>,
    auth: OptionalAuth,
    Query(query): Query<FollowersQuery>,
) -> Result<Json<Connection<FollowerResponse>>, PlatformError> {
    let connection = state
        .follower_service
        .list(
            auth.principal(),
            query.resource_name,
            query.resource_id,
            &query.page.into(),
        )
        .await?;
    Ok(Json(connection.map(FollowerResponse::from)))
}

pub fn followers_router(state: FollowersState) -> Router {
    Router::new()
        .route("/", get(list_followers).post(follow))
        .route("/unfollow", post(unfollow))
        .with_state(state)
}
