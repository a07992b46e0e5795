//! Institute Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

/// A faculty or department within a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Owning school id.
    pub school: String,

    #[serde(default)]
    pub follower_counter: i64,

    pub created_by: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Institute {
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
            follower_counter: 0,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Subject for Institute {
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

impl Record for Institute {
    const COLLECTION: &'static str = "institutes";
    const SUBJECT_TYPE: &'static str = "Institute";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
