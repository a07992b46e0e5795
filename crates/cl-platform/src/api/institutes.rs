//! Institutes API

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::Institute;
use crate::error::PlatformError;
use crate::service::institute::{CreateInstituteInput, ListInstitutesInput, UpdateInstituteInput};
use crate::service::InstituteService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstituteResponse {
    pub id: String,
    pub name: String,
    pub school: String,
    pub follower_counter: i64,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Institute> for InstituteResponse {
    fn from(i: Institute) -> Self {
        Self {
            id: i.id,
            name: i.name,
            school: i.school,
            follower_counter: i.follower_counter,
            created_by: i.created_by,
            created_at: i.created_at.to_rfc3339(),
            updated_at: i.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InstitutesQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub school: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct InstitutesState {
    pub institute_service: Arc<InstituteService>,
}

/// Create an institute
#[utoipa::path(
    post,
    path = "",
    tag = "institutes",
    request_body = CreateInstituteInput,
    responses(
        (status = 200, description = "Institute created", body = InstituteResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_institute(
    State(state): State<InstitutesState>,
    Authenticated(principal): Authenticated,
    Json(input): Json<CreateInstituteInput>,
) -> Result<Json<InstituteResponse>, PlatformError> {
    let institute = state.institute_service.create(&principal, input).await?;
    Ok(Json(institute.into()))
}

/// Get an institute by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "institutes",
    params(("id" = String, Path, description = "Institute ID")),
    responses(
        (status = 200, description = "Institute found", body = InstituteResponse),
        (status = 404, description = "Institute not found")
    )
)]
pub async fn get_institute(
    State(state): State<InstitutesState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<InstituteResponse>, PlatformError> {
    let institute = state
        .institute_service
        .get_by_id(auth.principal(), &id)
        .await?;
    Ok(Json(institute.into()))
}

/// List institutes as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "institutes",
    params(InstitutesQuery),
    responses((status = 200, description = "Connection of institutes"))
)]
pub async fn list_institutes(
    State(state): State<InstitutesState>,
    auth: OptionalAuth,
    Query(query): Query<InstitutesQuery>,
) -> Result<Json<Connection<InstituteResponse>>, PlatformError> {
    let filters = ListInstitutesInput {
        school: query.school,
        name: query.name,
    };
    let connection = state
        .institute_service
        .list(auth.principal(), filters, &query.page.into())
        .await?;
    Ok(Json(connection.map(InstituteResponse::from)))
}

/// Update an institute
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "institutes",
    params(("id" = String, Path, description = "Institute ID")),
    request_body = UpdateInstituteInput,
    responses(
        (status = 200, description = "Institute updated", body = InstituteResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Institute not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_institute(
    State(state): State<InstitutesState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateInstituteInput>,
) -> Result<Json<InstituteResponse>, PlatformError> {
    let institute = state
        .institute_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(institute.into()))
}

/// Delete an institute
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "institutes",
    params(("id" = String, Path, description = "Institute ID")),
    responses(
        (status = 200, description = "Institute deleted", body = InstituteResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Institute not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_institute(
    State(state): State<InstitutesState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<InstituteResponse>, PlatformError> {
    let institute = state
        .institute_service
        .delete(Some(&principal), &id)
        .await?;
    Ok(Json(institute.into()))
}

pub fn institutes_router(state: InstitutesState) -> Router {
    Router::new()
        .route("/", get(list_institutes).post(create_institute))
        .route(
            "/:id",
            get(get_institute)
                .put(update_institute)
                .delete(delete_institute),
        )
        .with_state(state)
}
