use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use newswire_core::Error as CoreError;

/// Errors surfaced by the HTTP API.
///
/// The article path fails loudly and specifically: client input errors,
/// upstream fetch failures, and unextractable pages each get their own
/// status. The news path only ever fails as a whole.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Failed to load page")]
    Upstream(#[source] CoreError),

    #[error("Failed to extract content")]
    NoContent,

    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            ApiError::MissingUrl => (StatusCode::BAD_REQUEST, "URL is required".to_string(), None),
            ApiError::Upstream(e) => {
                tracing::error!("Upstream fetch failed: {}", e);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Failed to load page".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::NoContent => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Failed to extract content".to_string(),
                None,
            ),
            ApiError::Internal { message, details } => {
                tracing::error!("Internal error: {} ({:?})", message, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message.clone(),
                    details.clone(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NoContent => ApiError::NoContent,
            // A malformed URL fails the same way an unreachable one does
            CoreError::UrlParse(_) => ApiError::Upstream(e),
            e if e.is_fetch_failure() => ApiError::Upstream(e),
            e => ApiError::Internal {
                message: "Server Error".to_string(),
                details: Some(e.to_string()),
            },
        }
    }
}

impl ApiError {
    pub fn news(e: CoreError) -> Self {
        ApiError::Internal {
            message: "Failed to fetch news".to_string(),
            details: Some(e.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
