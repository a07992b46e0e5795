//! Service Layer
//!
//! Entity services composing the resource-access facade, plus auth and
//! password services.

pub mod auth;
pub mod calendar_event;
pub mod discussion;
pub mod follower;
pub mod institute;
pub mod password;
pub mod school;
pub mod subject;
pub mod user;

pub use auth::{extract_bearer_token, AuthConfig, AuthService, Claims};
pub use calendar_event::CalendarEventService;
pub use discussion::DiscussionService;
pub use follower::FollowerService;
pub use institute::InstituteService;
pub use password::PasswordService;
pub use school::SchoolService;
pub use subject::SubjectService;
pub use user::UserService;
