//! Subjects API

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::SubjectEntity;
use crate::error::PlatformError;
use crate::service::subject::{CreateSubjectInput, ListSubjectsInput, UpdateSubjectInput};
use crate::service::SubjectService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub id: String,
    pub name: String,
    pub school: String,
    pub institute: Option<String>,
    pub follower_counter: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SubjectEntity> for SubjectResponse {
    fn from(s: SubjectEntity) -> Self {
        Self {
            id: s.id,
            name: s.name,
            school: s.school,
            institute: s.institute,
            follower_counter: s.follower_counter,
            created_by: s.created_by,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubjectsQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub school: Option<String>,
    pub institute: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct SubjectsState {
    pub subject_service: Arc<SubjectService>,
}

/// Create a subject
#[utoipa::path(
    post,
    path = "",
    tag = "subjects",
    request_body = CreateSubjectInput,
    responses(
        (status = 200, description = "Subject created", body = SubjectResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_subject(
    State(state): State<SubjectsState>,
    Authenticated(principal): Authenticated,
    Json(input): Json<CreateSubjectInput>,
) -> Result<Json<SubjectResponse>, PlatformError> {
    let subject = state.subject_service.create(&principal, input).await?;
    Ok(Json(subject.into()))
}

/// Get a subject by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "subjects",
    params(("id" = String, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found")
    )
)]
pub async fn get_subject(
    State(state): State<SubjectsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<SubjectResponse>, PlatformError> {
    let subject = state
        .subject_service
        .get_by_id(auth.principal(), &id)
        .await?;
    Ok(Json(subject.into()))
}

/// List subjects as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "subjects",
    params(SubjectsQuery),
    responses((status = 200, description = "Connection of subjects"))
)]
pub async fn list_subjects(
    State(state): State<SubjectsState>,
    auth: OptionalAuth,
    Query(query): Query<SubjectsQuery>,
) -> Result<Json<Connection<SubjectResponse>>, PlatformError> {
    let filters = ListSubjectsInput {
        school: query.school,
        institute: query.institute,
        name: query.name,
    };
    let connection = state
        .subject_service
        .list(auth.principal(), filters, &query.page.into())
        .await?;
    Ok(Json(connection.map(SubjectResponse::from)))
}

/// Update a subject
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "subjects",
    params(("id" = String, Path, description = "Subject ID")),
    request_body = UpdateSubjectInput,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_subject(
    State(state): State<SubjectsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateSubjectInput>,
) -> Result<Json<SubjectResponse>, PlatformError> {
    let subject = state
        .subject_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(subject.into()))
}

/// Delete a subject
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "subjects",
    params(("id" = String, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted", body = SubjectResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_subject(
    State(state): State<SubjectsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SubjectResponse>, PlatformError> {
    let subject = state
        .subject_service
        .delete(Some(&principal), &id)
        .await?;
    Ok(Json(subject.into()))
}

pub fn subjects_router(state: SubjectsState) -> Router {
    Router::new()
        .route("/", get(list_subjects).post(create_subject))
        .route(
            "/:id",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
        .with_state(state)
}
