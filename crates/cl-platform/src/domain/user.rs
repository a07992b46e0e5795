//! User Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{FieldValue, Subject};
use crate::domain::{new_record_id, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Unique login handle, stored lowercase.
    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Argon2 hash. Never exposed through `Subject::attr` or API DTOs.
    pub password_hash: String,

    #[serde(default)]
    pub admin: bool,

    // Counter caches
    #[serde(default)]
    pub follower_counter: i64,
    #[serde(default)]
    pub following_counter: i64,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            username: username.into().to_lowercase(),
            full_name: None,
            email: None,
            mobile: None,
            password_hash: password_hash.into(),
            admin: false,
            follower_counter: 0,
            following_counter: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
}

impl Subject for User {
    fn subject_type(&self) -> &str {
        Self::SUBJECT_TYPE
    }

    fn attr(&self, field: &str) -> Option<FieldValue> {
        match field {
            "_id" => Some(self.id.as_str().into()),
            "username" => Some(self.username.as_str().into()),
            "admin" => Some(self.admin.into()),
            _ => None,
        }
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const SUBJECT_TYPE: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_and_email_are_lowercased() {
        let user = User::new("Alice", "hash").with_email("Alice@Example.COM");
        assert_eq!(user.username, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn password_hash_is_not_exposed_as_attribute() {
        let user = User::new("alice", "secret-hash");
        assert!(user.attr("passwordHash").is_none());
        assert!(user.attr("password_hash").is_none());
    }
}
