//! Error handling for the bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Body sent to clients on every internal failure. Never carries error detail.
pub const INTERNAL_ERROR_BODY: &str = "internal server error";

/// Structured error payload used for client-side errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub details: Vec<serde_json::Value>,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();

        match self {
            AppError::NotFound { message, code } => {
                let status = StatusCode::NOT_FOUND;
                tracing::warn!(
                    error_id = %error_id,
                    error_code = %code,
                    status_code = %status.as_u16(),
                    "request error"
                );

                let envelope = ErrorEnvelope {
                    error: ErrorBody {
                        details: Vec::new(),
                        message,
                        code,
                        trace_id: error_id.to_string(),
                        timestamp: OffsetDateTime::now_utc().to_string(),
                    },
                };
                (status, Json(envelope)).into_response()
            }
            AppError::Internal(e) => {
                // Full chain stays server-side.
                tracing::error!(
                    error_id = %error_id,
                    status_code = %StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    error = %format!("{e:#}"),
                    "request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
