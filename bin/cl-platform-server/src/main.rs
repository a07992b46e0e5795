//! CampusLink Platform Server
//!
//! Production server for the platform REST APIs: schools, institutes,
//! subjects, users, discussions, calendar events, and follow edges.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CL_API_PORT` | `8080` | HTTP API port |
//! | `CL_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `CL_MONGO_DB` | `campuslink` | MongoDB database name |
//! | `CL_JWT_SECRET` | - | HS256 signing secret (required) |
//! | `CL_JWT_ISSUER` | `campuslink` | JWT issuer claim |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Json, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cl_platform::api::{
    auth_router, calendar_events_router, discussions_router, followers_router, institutes_router,
    schools_router, subjects_router, users_router, AppState, AuthApiState, CalendarEventsState,
    DiscussionsState, FollowersState, InstitutesState, PlatformApiDoc, SchoolsState, SubjectsState,
    UsersState,
};
use cl_platform::service::{
    AuthConfig, AuthService, CalendarEventService, DiscussionService, FollowerService,
    InstituteService, PasswordService, SchoolService, SubjectService, UserService,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting CampusLink Platform Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("CL_API_PORT", 8080);
    let mongo_url = env_or("CL_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("CL_MONGO_DB", "campuslink");
    let jwt_secret =
        std::env::var("CL_JWT_SECRET").context("CL_JWT_SECRET must be set")?;
    let jwt_issuer = env_or("CL_JWT_ISSUER", "campuslink");

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    // Auth services
    let auth_config = AuthConfig {
        secret_key: jwt_secret,
        issuer: jwt_issuer,
        ..AuthConfig::default()
    };
    let auth_service = Arc::new(AuthService::new(auth_config));
    let password_service = Arc::new(PasswordService::default());

    // Entity services
    let school_service = Arc::new(SchoolService::new(&db));
    let institute_service = Arc::new(InstituteService::new(&db));
    let subject_service = Arc::new(SubjectService::new(&db));
    let user_service = Arc::new(UserService::new(&db, password_service));
    let discussion_service = Arc::new(DiscussionService::new(&db));
    let calendar_event_service = Arc::new(CalendarEventService::new(&db));
    let follower_service = Arc::new(FollowerService::new(
        &db,
        school_service.clone(),
        institute_service.clone(),
        subject_service.clone(),
        user_service.clone(),
    ));
    info!("Services initialized");

    let app_state = AppState {
        auth_service: auth_service.clone(),
    };

    // Build API states
    let auth_state = AuthApiState {
        auth_service,
        user_service: user_service.clone(),
    };
    let schools_state = SchoolsState {
        school_service,
        institute_service: institute_service.clone(),
        subject_service: subject_service.clone(),
        follower_service: follower_service.clone(),
    };
    let institutes_state = InstitutesState { institute_service };
    let subjects_state = SubjectsState { subject_service };
    let users_state = UsersState { user_service };
    let discussions_state = DiscussionsState { discussion_service };
    let calendar_events_state = CalendarEventsState {
        calendar_event_service,
    };
    let followers_state = FollowersState { follower_service };

    // Build platform API router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api/schools", schools_router(schools_state))
        .nest("/api/institutes", institutes_router(institutes_state))
        .nest("/api/subjects", subjects_router(subjects_state))
        .nest("/api/users", users_router(users_state))
        .nest("/api/discussions", discussions_router(discussions_state))
        .nest(
            "/api/calendar-events",
            calendar_events_router(calendar_events_state),
        )
        .nest("/api/followers", followers_router(followers_state))
        .route("/health", get(health_handler))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", PlatformApiDoc::openapi()))
        .layer(axum::Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let api_listener = TcpListener::bind(&api_addr).await?;

    info!("CampusLink Platform Server started");
    info!("Press Ctrl+C to shutdown");

    // Drain in-flight requests before exiting.
    axum::serve(api_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("CampusLink Platform Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
