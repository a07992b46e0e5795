//! Calendar Event Service
//!
//! Range search builds `$and` conditions the way the MongoDB query shape
//! expects: an event overlaps [rangeStart, rangeEnd] when it ends after the
//! range starts and starts before the range ends.

use std::sync::Arc;

use bson::{doc, Document};
use chrono::{DateTime, Utc};
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{CalendarEvent, Principal};
use crate::error::{PlatformError, Result};
use crate::repository::MongoAccessor;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarEventInput {
    pub title: String,
    pub subject: String,
    pub start_date_utc: DateTime<Utc>,
    /// Recurrence rule, stored verbatim. Requires `end_date_utc`.
    pub rrule: Option<String>,
    /// End of the last occurrence; computed by the calendar collaborator
    /// when a recurrence rule is present.
    pub end_date_utc: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalendarEventInput {
    pub title: Option<String>,
    pub start_date_utc: Option<DateTime<Utc>>,
    pub end_date_utc: Option<DateTime<Utc>>,
}

impl UpdateCalendarEventInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(title) = self.title {
            patch.insert("title", title);
        }
        if let Some(start) = self.start_date_utc {
            patch.insert("startDateUtc", bson::DateTime::from_chrono(start));
        }
        if let Some(end) = self.end_date_utc {
            patch.insert("endDateUtc", bson::DateTime::from_chrono(end));
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCalendarEventsInput {
    pub subject: Option<String>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
}

impl ListCalendarEventsInput {
    fn into_filter(self) -> Document {
        let mut conditions = Vec::new();
        if let Some(subject) = self.subject {
            conditions.push(doc! { "subject": subject });
        }
        if let Some(range_start) = self.range_start {
            conditions.push(doc! {
                "endDateUtc": { "$gte": bson::DateTime::from_chrono(range_start) }
            });
        }
        if let Some(range_end) = self.range_end {
            conditions.push(doc! {
                "startDateUtc": { "$lte": bson::DateTime::from_chrono(range_end) }
            });
        }
        if conditions.is_empty() {
            Document::new()
        } else {
            doc! { "$and": conditions }
        }
    }
}

pub struct CalendarEventService {
    resources: ResourceService<CalendarEvent, MongoAccessor<CalendarEvent>>,
}

impl CalendarEventService {
    pub fn new(db: &Database) -> Self {
        Self {
            resources: ResourceService::new(Arc::new(MongoAccessor::new(db))),
        }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateCalendarEventInput,
    ) -> Result<CalendarEvent> {
        let mut event = CalendarEvent::new(
            input.title,
            input.subject,
            input.start_date_utc,
            &principal.id,
        );
        if let Some(rrule) = input.rrule {
            let end = input.end_date_utc.ok_or_else(|| {
                PlatformError::validation("endDateUtc is required when rrule is set")
            })?;
            event = event.with_rrule(rrule, end);
        }
        self.resources.create(Some(principal), event).await
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<CalendarEvent> {
        self.resources.get_by_id(principal, id).await
    }

    /// Windowed search over subject and date-range filters.
    pub async fn search(
        &self,
        principal: Option<&Principal>,
        filters: ListCalendarEventsInput,
        args: &PageArgs,
    ) -> Result<Connection<CalendarEvent>> {
        self.resources
            .list(principal, filters.into_filter(), args)
            .await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateCalendarEventInput,
    ) -> Result<CalendarEvent> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<CalendarEvent> {
        self.resources.delete(principal, id).await
    }
}
