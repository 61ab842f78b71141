//! Error types for the chat engine

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by the chat engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),

    #[error("document not found: {0}")]
    DocumentNotFound(uuid::Uuid),

    #[error("document already attached: {0}")]
    DocumentAlreadyAttached(uuid::Uuid),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("AI provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::DocumentAlreadyAttached(_) => "DOCUMENT_ALREADY_ATTACHED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Provider(_) | Self::Http(_) => "AI_SERVICE_ERROR",
            Self::ExtractionFailed(_) => "EXTRACTION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) | Self::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Self::DocumentAlreadyAttached(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Provider(_) | Self::Http(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (self.status(), body).into_response()
    }
}
