//! Discussions API

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::Authenticated;
use crate::domain::Discussion;
use crate::error::PlatformError;
use crate::service::discussion::{CreateDiscussionInput, UpdateDiscussionInput};
use crate::service::DiscussionService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub subject: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Discussion> for DiscussionResponse {
    fn from(d: Discussion) -> Self {
        Self {
            id: d.id,
            title: d.title,
            body: d.body,
            subject: d.subject,
            created_by: d.created_by,
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DiscussionsQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub subject: Option<String>,
}

#[derive(Clone)]
pub struct DiscussionsState {
    pub discussion_service: Arc<DiscussionService>,
}

/// Start a discussion
#[utoipa::path(
    post,
    path = "",
    tag = "discussions",
    request_body = CreateDiscussionInput,
    responses(
        (status = 200, description = "Discussion created", body = DiscussionResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_discussion(
    State(state): State<DiscussionsState>,
    Authenticated(principal): Authenticated,
    Json(input): Json<CreateDiscussionInput>,
) -> Result<Json<DiscussionResponse>, PlatformError> {
    let discussion = state.discussion_service.create(&principal, input).await?;
    Ok(Json(discussion.into()))
}

/// Get a discussion by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "discussions",
    params(("id" = String, Path, description = "Discussion ID")),
    responses(
        (status = 200, description = "Discussion found", body = DiscussionResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Discussion not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_discussion(
    State(state): State<DiscussionsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<DiscussionResponse>, PlatformError> {
    let discussion = state
        .discussion_service
        .get_by_id(Some(&principal), &id)
        .await?;
    Ok(Json(discussion.into()))
}

/// List discussions as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "discussions",
    params(DiscussionsQuery),
    responses((status = 200, description = "Connection of discussions")),
    security(("bearer_auth" = []))
)]
pub async fn list_discussions(
    State(state): State<DiscussionsState>,
    Authenticated(principal): Authenticated,
    Query(query): Query<DiscussionsQuery>,
) -> Result<Json<Connection<DiscussionResponse>>, PlatformError> {
    let connection = state
        .discussion_service
        .list(Some(&principal), query.subject, &query.page.into())
        .await?;
    Ok(Json(connection.map(DiscussionResponse::from)))
}

/// Update a discussion
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "discussions",
    params(("id" = String, Path, description = "Discussion ID")),
    request_body = UpdateDiscussionInput,
    responses(
        (status = 200, description = "Discussion updated", body = DiscussionResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Discussion not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_discussion(
    State(state): State<DiscussionsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateDiscussionInput>,
) -> Result<Json<DiscussionResponse>, PlatformError> {
    let discussion = state
        .discussion_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(discussion.into()))
}

/// Delete a discussion
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "discussions",
    params(("id" = String, Path, description = "Discussion ID")),
    responses(
        (status = 200, description = "Discussion deleted", body = DiscussionResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Discussion not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_discussion(
    State(state): State<DiscussionsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<DiscussionResponse>, PlatformError> {
    let discussion = state
        .discussion_service
        .delete(Some(&principal), &id)
        .await?;
    Ok(Json(discussion.into()))
}

pub fn discussions_router(state: DiscussionsState) -> Router {
    Router::new()
        .route("/", get(list_discussions).post(create_discussion))
        .route(
            "/:id",
            get(get_discussion)
                .put(update_discussion)
                .delete(delete_discussion),
        )
        .with_state(state)
}
