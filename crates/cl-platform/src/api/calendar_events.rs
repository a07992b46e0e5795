//! Calendar Events API

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::access::Connection;
use crate::api::common::ConnectionParams;
use crate::api::middleware::{Authenticated, OptionalAuth};
use crate::domain::CalendarEvent;
use crate::error::PlatformError;
use crate::service::calendar_event::{
    CreateCalendarEventInput, ListCalendarEventsInput, UpdateCalendarEventInput,
};
use crate::service::CalendarEventService;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub start_date_utc: String,
    pub end_date_utc: String,
    pub rrule: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(e: CalendarEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            subject: e.subject,
            start_date_utc: e.start_date_utc.to_rfc3339(),
            end_date_utc: e.end_date_utc.to_rfc3339(),
            rrule: e.rrule,
            created_by: e.created_by,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CalendarEventsQuery {
    #[serde(flatten)]
    pub page: ConnectionParams,

    pub subject: Option<String>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct CalendarEventsState {
    pub calendar_event_service: Arc<CalendarEventService>,
}

/// Create a calendar event
#[utoipa::path(
    post,
    path = "",
    tag = "calendar-events",
    request_body = CreateCalendarEventInput,
    responses(
        (status = 200, description = "Event created", body = CalendarEventResponse),
        (status = 400, description = "Recurrence rule without end date"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_calendar_event(
    State(state): State<CalendarEventsState>,
    Authenticated(principal): Authenticated,
    Json(input): Json<CreateCalendarEventInput>,
) -> Result<Json<CalendarEventResponse>, PlatformError> {
    let event = state
        .calendar_event_service
        .create(&principal, input)
        .await?;
    Ok(Json(event.into()))
}

/// Get a calendar event by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "calendar-events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = CalendarEventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_calendar_event(
    State(state): State<CalendarEventsState>,
    auth: OptionalAuth,
    Path(id): Path<String>,
) -> Result<Json<CalendarEventResponse>, PlatformError> {
    let event = state
        .calendar_event_service
        .get_by_id(auth.principal(), &id)
        .await?;
    Ok(Json(event.into()))
}

/// Search calendar events by subject and date range, as a connection
#[utoipa::path(
    get,
    path = "",
    tag = "calendar-events",
    params(CalendarEventsQuery),
    responses((status = 200, description = "Connection of events"))
)]
pub async fn search_calendar_events(
    State(state): State<CalendarEventsState>,
    auth: OptionalAuth,
    Query(query): Query<CalendarEventsQuery>,
) -> Result<Json<Connection<CalendarEventResponse>>, PlatformError> {
    let filters = ListCalendarEventsInput {
        subject: query.subject,
        range_start: query.range_start,
        range_end: query.range_end,
    };
    let connection = state
        .calendar_event_service
        .search(auth.principal(), filters, &query.page.into())
        .await?;
    Ok(Json(connection.map(CalendarEventResponse::from)))
}

/// Update a calendar event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "calendar-events",
    params(("id" = String, Path, description = "Event ID")),
    request_body = UpdateCalendarEventInput,
    responses(
        (status = 200, description = "Event updated", body = CalendarEventResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_calendar_event(
    State(state): State<CalendarEventsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(input): Json<UpdateCalendarEventInput>,
) -> Result<Json<CalendarEventResponse>, PlatformError> {
    let event = state
        .calendar_event_service
        .update(Some(&principal), &id, input)
        .await?;
    Ok(Json(event.into()))
}

/// Delete a calendar event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "calendar-events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = CalendarEventResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_calendar_event(
    State(state): State<CalendarEventsState>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<CalendarEventResponse>, PlatformError> {
    let event = state
        .calendar_event_service
        .delete(Some(&principal), &id)
        .await?;
    Ok(Json(event.into()))
}

pub fn calendar_events_router(state: CalendarEventsState) -> Router {
    Router::new()
        .route("/", get(search_calendar_events).post(create_calendar_event))
        .route(
            "/:id",
            get(get_calendar_event)
                .put(update_calendar_event)
                .delete(delete_calendar_event),
        )
        .with_state(state)
}
