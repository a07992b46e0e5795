//! Schools API
//!
//! CRUD plus connection queries for schools and their related collections.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::School;
use crate::error::PlatformError;
use crate::service::school::{CreateSchoolInput, ListSchoolsInput, UpdateSchoolInput};
use crate::service::{FollowerService, InstituteService, SchoolService, SubjectService};

/// School response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolResponse {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub parent_school: Option<String>,
    pub archived: bool,
    pub follower_counter: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<School> for SchoolResponse {
    fn from(s: School) -> Self {
        Self {
            id: s.id,
            name: s.name,
            short_name: s.short_name,
            parent_school: s.parent_school,
            archived: s.archived,
            follower_counter: s.follower_counter,
            created_by: s.created_by,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for the schools list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SchoolsQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub name: Option<String>,
    pub parent_school: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Clone)]
pub struct SchoolsState {
    pub school_service: Arc<SchoolService>,
    pub institute_service: Arc<InstituteService>,
    pub subject_service: Arc<SubjectService>,
    pub follower_service: Arc<FollowerService>,
}

/// Create a school
#[utoipa::path(
    post,
    path = "",
    tag = "schools",
    request_body = CreateSchoolInput,
    responses(
        (status = 200, description = "School created", body = SchoolResponse),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Duplicate short name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_school(
    State(state): State<SchoolsState>,
    Authenticated(principal): Authenticated,
    Json(input): Json<CreateSchoolInput>,
) -> Result<Json<SchoolResponse>, PlatformError> {
    let school = state.school_service.create(&principal, input).await?;
    Ok(Json(school.into()))
}

/// Get a school by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "schools",
    params(("id" = String, Path, description = "School ID")),
    responses(
        (status = 200, description = "School found", body = SchoolResponse),
        (status = 404, description = "School not found")
    )
)]
pub async fn get_school(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<SchoolResponse>, PlatformError> {
    let school = state
        .school_service
        .get_by_id(auth.principal(), &id)
        .await?;
    Ok(Json(school.into()))
}

/// Get a school by its unique short name
#[utoipa::path(
    get,
    path = "/by-short-name/{shortName}",
    tag = "schools",
    params(("shortName" = String, Path, description = "School short name")),
    responses(
        (status = 200, description = "School found", body = SchoolResponse),
        (status = 404, description = "School not found")
    )
)]
pub async fn get_school_by_short_name(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(short_name): Path<String>,
) -> Result<Json<SchoolResponse>, PlatformError> {
    let school = state
        .school_service
        .get_by_short_name(auth.principal(), &short_name)
        .await?;
    Ok(Json(school.into()))
}

/// List schools as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "schools",
    params(SchoolsQuery),
    responses((status = 200, description = "Connection of schools"))
)]
pub async fn list_schools(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Query(query): Query<SchoolsQuery>,
) -> Result<Json<Connection<SchoolResponse>>, PlatformError> {
    let filters = ListSchoolsInput {
        name: query.name,
        parent_school: query.parent_school,
        archived: query.archived,
    };
    let connection = state
        .school_service
        .list(auth.principal(), filters, &query.page.into())
        .await?;
    Ok(Json(connection.map(SchoolResponse::from)))
}

/// Update a school
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "schools",
    params(("id" = String, Path, description = "School ID")),
    request_body = UpdateSchoolInput,
    responses(
        (status = 200, description = "School updated", body = SchoolResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "School not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_school(
    State(state): State<SchoolsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateSchoolInput>,
) -> Result<Json<SchoolResponse>, PlatformError> {
    let school = state
        .school_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(school.into()))
}

/// Delete a school
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "schools",
    params(("id" = String, Path, description = "School ID")),
    responses(
        (status = 200, description = "School deleted", body = SchoolResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "School not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_school(
    State(state): State<SchoolsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SchoolResponse>, PlatformError> {
    let school = state
        .school_service
        .delete(Some(&principal), &id)
        .await?;
    Ok(Json(school.into()))
}

/// Child schools of a school, as a connection
#[utoipa::path(
    get,
    path = "/{id}/children",
    tag = "schools",
    params(("id" = String, Path, description = "Parent school ID"), ConnectionParams),
    responses((status = 200, description = "Connection of child schools"))
)]
pub async fn list_children(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
    Query(page): Query<ConnectionParams>,
) -> Result<Json<Connection<SchoolResponse>>, PlatformError> {
    let connection = state
        .school_service
        .list_children(auth.principal(), &id, &page.into())
        .await?;
    Ok(Json(connection.map(SchoolResponse::from)))
}

/// Institutes of a school, as a connection
#[utoipa::path(
    get,
    path = "/{id}/institutes",
    tag = "schools",
    params(("id" = String, Path, description = "School ID"), ConnectionParams),
    responses((status = 200, description = "Connection of institutes"))
)]
pub async fn list_school_institutes(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
    Query(page): Query<ConnectionParams>,
) -> Result<Json<Connection<crate::api::institutes::InstituteResponse>>, PlatformError> {
    let connection = state
        .institute_service
        .list_by_school(auth.principal(), &id, &page.into())
        .await?;
    Ok(Json(connection.map(Into::into)))
}

/// Subjects of a school, as a connection
#[utoipa::path(
    get,
    path = "/{id}/subjects",
    tag = "schools",
    params(("id" = String, Path, description = "School ID"), ConnectionParams),
    responses((status = 200, description = "Connection of subjects"))
)]
pub async fn list_school_subjects(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
    Query(page): Query<ConnectionParams>,
) -> Result<Json<Connection<crate::api::subjects::SubjectResponse>>, PlatformError> {
    let connection = state
        .subject_service
        .list_by_school(auth.principal(), &id, &page.into())
        .await?;
    Ok(Json(connection.map(Into::into)))
}

/// Followers of a school, as a connection
#[utoipa::path(
    get,
    path = "/{id}/followers",
    tag = "schools",
    params(("id" = String, Path, description = "School ID"), ConnectionParams),
    responses((status = 200, description = "Connection of followers"))
)]
pub async fn list_school_followers(
    State(state): State<SchoolsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
    Query(page): Query<ConnectionParams>,
) -> Result<Json<Connection<crate::api::followers::FollowerResponse>>, PlatformError> {
    let connection = state
        .follower_service
        .list(
            auth.principal(),
            Some("School".to_string()),
            Some(id),
            &page.into(),
        )
        .await?;
    Ok(Json(connection.map(Into::into)))
}

pub fn schools_router(state: SchoolsState) -> Router {
    Router::new()
        .route("/", get(list_schools).post(create_school))
        .route(
            "/:id",
            get(get_school).put(update_school).delete(delete_school),
        )
        .route("/by-short-name/:short_name", get(get_school_by_short_name))
        .route("/:id/children", get(list_children))
        .route("/:id/institutes", get(list_school_institutes))
        .route("/:id/subjects", get(list_school_subjects))
        .route("/:id/followers", get(list_school_followers))
        .with_state(state)
}
