use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body shape shared with the voice-agent consumer: a single
/// human-readable `detail` field.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    detail: String,
    is_operational: bool,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: message.into(),
            is_operational: false,
        }
    }

    fn operational(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            detail: message.into(),
            is_operational: true,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::warn!(error = %err, "storage query failed");
        Self::internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = if self.is_operational {
            self.detail
        } else {
            "internal server error".to_string()
        };

        (self.status, Json(ErrorResponse { detail })).into_response()
    }
}
