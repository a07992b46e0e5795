//! OpenAPI Documentation
//!
//! Central OpenAPI specification for all platform APIs.

use utoipa::OpenApi;

/// Platform API OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampusLink Platform API",
        version = "1.0.0",
        description = "REST APIs for schools, institutes, subjects, users, discussions, and calendars"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "schools", description = "School management"),
        (name = "institutes", description = "Institute management"),
        (name = "subjects", description = "Subject management"),
        (name = "users", description = "User accounts"),
        (name = "discussions", description = "Discussions"),
        (name = "calendar-events", description = "Calendar events"),
        (name = "followers", description = "Follow edges")
    ),
    paths(
        // Auth API
        super::auth::register,
        super::auth::login,
        // Schools API
        super::schools::create_school,
        super::schools::get_school,
        super::schools::get_school_by_short_name,
        super::schools::list_schools,
        super::schools::update_school,
        super::schools::delete_school,
        super::schools::list_children,
        super::schools::list_school_institutes,
        super::schools::list_school_subjects,
        super::schools::list_school_followers,
        // Institutes API
        super::institutes::create_institute,
        super::institutes::get_institute,
        super::institutes::list_institutes,
        super::institutes::update_institute,
        super::institutes::delete_institute,
        // Subjects API
        super::subjects::create_subject,
        super::subjects::get_subject,
        super::subjects::list_subjects,
        super::subjects::update_subject,
        super::subjects::delete_subject,
        // Users API
        super::users::get_user,
        super::users::list_users,
        super::users::update_user,
        super::users::delete_user,
        // Discussions API
        super::discussions::create_discussion,
        super::discussions::get_discussion,
        super::discussions::list_discussions,
        super::discussions::update_discussion,
        super::discussions::delete_discussion,
        // Calendar Events API
        super::calendar_events::create_calendar_event,
        super::calendar_events::get_calendar_event,
        super::calendar_events::search_calendar_events,
        super::calendar_events::update_calendar_event,
        super::calendar_events::delete_calendar_event,
        // Followers API
        super::followers::follow,
        super::followers::unfollow,
        super::followers::list_followers,
    ),
    components(
        schemas(
            // Auth schemas
            super::auth::LoginRequest,
            super::auth::TokenResponse,
            crate::service::user::RegisterUserInput,
            // School schemas
            super::schools::SchoolResponse,
            crate::service::school::CreateSchoolInput,
            crate::service::school::UpdateSchoolInput,
            // Institute schemas
            super::institutes::InstituteResponse,
            crate::service::institute::CreateInstituteInput,
            crate::service::institute::UpdateInstituteInput,
            // Subject schemas
            super::subjects::SubjectResponse,
            crate::service::subject::CreateSubjectInput,
            crate::service::subject::UpdateSubjectInput,
            // User schemas
            super::users::UserResponse,
            crate::service::user::UpdateUserInput,
            // Discussion schemas
            super::discussions::DiscussionResponse,
            crate::service::discussion::CreateDiscussionInput,
            crate::service::discussion::UpdateDiscussionInput,
            // Calendar Event schemas
            super::calendar_events::CalendarEventResponse,
            crate::service::calendar_event::CreateCalendarEventInput,
            crate::service::calendar_event::UpdateCalendarEventInput,
            // Follower schemas
            super::followers::FollowerResponse,
            super::followers::FollowRequest,
            // Common schemas
            super::common::ApiError,
            super::common::SuccessResponse,
        )
    )
)]
pub struct PlatformApiDoc;
