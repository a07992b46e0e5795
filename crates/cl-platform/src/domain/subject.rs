//! Subject (course) Entity
//!
//! Named `SubjectEntity` in re-exports to avoid clashing with the
//! `access::Subject` trait.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject as SubjectView};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// School offering the subject.
    pub school: String,

    /// Institute offering the subject, when it belongs to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,

    #[serde(default)]
    pub follower_counter: i64,

    pub created_by: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(
        name: impl Into<String>,
        school: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            name: name.into(),
            school: school.into(),
            institute: None,
            follower_counter: 0,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = Some(institute.into());
        self
    }
}

impl SubjectView for Subject {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "createdBy" => Some(self.created_by.as_str().into()),
            "school" => Some(self.school.as_str().into()),
            _ => None,
        }
    }
}

impl Record for Subject {
    const COLLECTION: &'static str = "subjects";
    const SUBJECT_TYPE: &'static str = "Subject";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
