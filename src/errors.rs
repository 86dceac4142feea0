use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::chunker::ChunkError;
use crate::services::llm_provider::CompletionFailure;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No readable text found in this PDF.")]
    EmptyDocument,

    #[error("Unreadable PDF: {0}")]
    UnreadablePdf(String),

    #[error("Chunking misconfigured: {0}")]
    Configuration(#[from] ChunkError),

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CompletionFailure> for AppError {
    fn from(failure: CompletionFailure) -> Self {
        match failure {
            CompletionFailure::Transport(msg) => AppError::Transport(msg),
            CompletionFailure::MalformedResponse(msg) => AppError::MalformedResponse(msg),
            CompletionFailure::InvalidRequest(msg) => AppError::Validation(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyDocument | AppError::UnreadablePdf(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Transport(_) | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                "Internal server error".to_string()
            }
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {e}");
                self.to_string()
            }
            AppError::Transport(_) | AppError::MalformedResponse(_) => {
                tracing::warn!("{self}");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = axum::Json(ErrorResponse {
            error: message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}
