//! Domain Models
//!
//! Entity records for the platform. All entities use opaque UUID string ids
//! and BSON-datetime `createdAt`/`updatedAt` stamps; `createdAt` doubles as
//! the pagination sort key.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::access::Subject;

pub mod calendar_event;
pub mod discussion;
pub mod follower;
pub mod institute;
pub mod principal;
pub mod school;
pub mod subject;
pub mod user;

pub use calendar_event::CalendarEvent;
pub use discussion::Discussion;
pub use follower::Follower;
pub use institute::Institute;
pub use principal::{Principal, PrincipalRole};
pub use school::School;
pub use subject::Subject as SubjectEntity;
pub use user::User;

/// A persistable entity record.
///
/// Extends the structural `Subject` view so capability conditions can be
/// evaluated against any record without knowing its concrete shape. The
/// record never owns its storage lifecycle; all reads and writes go through
/// a `RecordAccessor`.
pub trait Record: Subject + Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {
    /// Collection the records live in.
    const COLLECTION: &'static str;

    /// Subject type name used by capability rules.
    const SUBJECT_TYPE: &'static str;

    fn id(&self) -> &str;

    /// Creation timestamp, the sort key for windowed pagination.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Fresh opaque record id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
