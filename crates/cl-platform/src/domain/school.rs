//! School Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Unique short handle used for direct lookup (e.g. "mit").
    pub short_name: String,

    /// Parent school for campus hierarchies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_school: Option<String>,

    /// Archived schools are frozen for non-admin updates by policy.
    #[serde(default)]
    pub archived: bool,

    /// Denormalized follower count, maintained by atomic increments.
    #[serde(default)]
    pub follower_counter: i64,

    /// User id of the creator; ownership anchor for capability conditions.
    pub created_by: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl School {
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            name: name.into(),
            short_name: short_name.into(),
            parent_school: None,
            archived: false,
            follower_counter: 0,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_parent(mut self, parent_school: impl Into<String>) -> Self {
        self.parent_school = Some(parent_school.into());
        self
    }
}

impl Subject for School {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "createdBy" => Some(self.created_by.as_str().into()),
            "archived" => Some(self.archived.into()),
            "shortName" => Some(self.short_name.as_str().into()),
            _ => None,
        }
    }
}

impl Record for School {
    const COLLECTION: &'static str = "schools";
    const SUBJECT_TYPE: &'static str = "School";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
