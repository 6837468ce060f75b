use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use personapath_auth::error::AuthError;
use personapath_core::error::CoreError;
use personapath_export::error::ExportError;
use personapath_session::{SessionError, Stage};
use personapath_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict { stage: Stage, action: &'static str },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, stage, action) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None, None),
            ApiError::Conflict { stage, action } => (
                StatusCode::CONFLICT,
                format!("cannot {action} while in {stage}"),
                Some(stage),
                Some(action),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                stage,
                action,
            }),
        )
            .into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidTransition { stage, action } => {
                ApiError::Conflict { stage, action }
            }
            SessionError::StaleGeneration { stage } => ApiError::Conflict {
                stage,
                action: "apply a result from an abandoned run",
            },
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Validation(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
