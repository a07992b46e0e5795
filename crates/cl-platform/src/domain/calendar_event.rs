//! Calendar Event Entity
//!
//! Recurrence rules are stored as verbatim RRULE strings; expanding them
//! into occurrence dates is the calendar collaborator's job, not this
//! layer's. When no rule is present the event ends when it starts.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    /// Subject the event belongs to.
    pub subject: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_date_utc: DateTime<Utc>,

    /// Last occurrence end. Equals `start_date_utc` for one-off events.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_date_utc: DateTime<Utc>,

    /// iCalendar RRULE, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,

    pub created_by: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        start_date_utc: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            title: title.into(),
            subject: subject.into(),
            start_date_utc,
            end_date_utc: start_date_utc,
            rrule: None,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_rrule(mut self, rrule: impl Into<String>, end_date_utc: DateTime<Utc>) -> Self {
        self.rrule = Some(rrule.into());
        self.end_date_utc = end_date_utc;
        self
    }
}

impl Subject for CalendarEvent {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "createdBy" => Some(self.created_by.as_str().into()),
            "subject" => Some(self.subject.as_str().into()),
            _ => None,
        }
    }
}

impl Record for CalendarEvent {
    const COLLECTION: &'static str = "calendar_events";
    const SUBJECT_TYPE: &'static str = "CalendarEvent";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
