//! API Layer
//!
//! REST API endpoints for the platform. Every entity router exposes the
//! connection (cursor-windowed) list shape alongside CRUD.

pub mod common;
pub mod middleware;

pub mod auth;
pub mod calendar_events;
pub mod discussions;
pub mod followers;
pub mod institutes;
pub mod openapi;
pub mod schools;
pub mod subjects;
pub mod users;

pub use common::*;
pub use middleware::{AppState, Authenticated, OptionalAuth};

pub use auth::{auth_router, AuthApiState};
pub use calendar_events::{calendar_events_router, CalendarEventsState};
pub use discussions::{discussions_router, DiscussionsState};
pub use followers::{followers_router, FollowersState};
pub use institutes::{institutes_router, InstitutesState};
pub use openapi::PlatformApiDoc;
pub use schools::{schools_router, SchoolsState};
pub use subjects::{subjects_router, SubjectsState};
pub use users::{users_router, UsersState};
