//! Follower Edge Entity
//!
//! One document per (user, followed resource) pair. The denormalized
//! counters on both ends are maintained by individually-atomic increments;
//! creating the edge and bumping a counter is not transactional.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    #[serde(rename = "_id")]
    pub id: String,

    /// The following user.
    pub user: String,

    /// Subject type of the followed record ("School", "User", ...).
    pub resource_name: String,

    /// Id of the followed record.
    pub resource_id: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Follower {
    pub fn new(
        user: impl Into<String>,
        resource_name: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            user: user.into(),
            resource_name: resource_name.into(),
            resource_id: resource_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Subject for Follower {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "user" => Some(self.user.as_str().into()),
            "resourceName" => Some(self.resource_name.as_str().into()),
            "resourceId" => Some(self.resource_id.as_str().into()),
            _ => None,
        }
    }
}

impl Record for Follower {
    const COLLECTION: &'static str = "followers";
    const SUBJECT_TYPE: &'static str = "Follower";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
