//! Discussion Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub body: String,

    /// Subject the discussion is attached to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub created_by: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            title: title.into(),
            body: body.into(),
            subject: None,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl Subject for Discussion {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "createdBy" => Some(self.created_by.as_str().into()),
            _ => None,
        }
    }
}

impl Record for Discussion {
    const COLLECTION: &'static str = "discussions";
    const SUBJECT_TYPE: &'static str = "Discussion";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
