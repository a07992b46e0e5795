//! Common API types and utilities

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::access::PageArgs;
use crate::error::PlatformError;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Connection-style pagination parameters
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ConnectionParams {
    /// Page size; absent or zero means no limit
    pub first: Option<i64>,
    /// Resume strictly after this cursor
    pub after: Option<String>,
    /// Resume strictly before this cursor
    pub before: Option<String>,
}

impl From<ConnectionParams> for PageArgs {
    fn from(params: ConnectionParams) -> Self {
        PageArgs {
            first: params.first,
            after: params.after,
            before: params.before,
        }
    }
}

/// Success response with optional message
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            PlatformError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PlatformError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            PlatformError::Unauthorized { .. }
            | PlatformError::InvalidToken { .. }
            | PlatformError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            PlatformError::InvalidCursor { .. } => (StatusCode::BAD_REQUEST, "INVALID_CURSOR"),
            PlatformError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PlatformError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("internal error: {self}");
        }

        let body = ApiError::new(code, self.to_string());
        (status, Json(body)).into_response()
    }
}
