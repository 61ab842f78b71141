//! API routes for the chat server

pub mod chat;
pub mod documents;
pub mod summary;

use axum::http::HeaderMap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_body_size: usize) -> Router<AppState> {
    Router::new()
        // Document upload creates a session; more can be attached later
        .route(
            "/documents",
            post(documents::upload_document).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route(
            "/sessions/:id/documents",
            get(documents::list_documents)
                .post(documents::add_document)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route(
            "/sessions/:id/documents/:doc_id",
            delete(documents::remove_document),
        )
        .route("/sessions/:id", delete(documents::delete_session))
        .route("/sessions/:id/summary", post(summary::generate_summary))
        // Chat
        .route("/chat/message", post(chat::message))
        .route("/chat/stream", post(chat::stream))
        .route("/chat/history/:id", get(chat::history))
        .route("/chat/session/:id", delete(chat::clear_session))
        // Info
        .route("/info", get(info))
}

/// Opaque user identifier attached by the identity layer, if any
///
/// Only used to decide whether persistence is attempted.
pub(crate) fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "docchat",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document chat with page citations and streamed answers",
        "endpoints": {
            "POST /api/documents": "Upload a document and open a chat session",
            "POST /api/sessions/:id/documents": "Attach another document to a session",
            "GET /api/sessions/:id/documents": "List a session's documents",
            "DELETE /api/sessions/:id/documents/:doc_id": "Detach a document",
            "DELETE /api/sessions/:id": "Delete a session",
            "POST /api/sessions/:id/summary": "Summarize a session's documents",
            "POST /api/chat/message": "Ask a question",
            "POST /api/chat/stream": "Ask a question, answer streamed as SSE",
            "GET /api/chat/history/:id": "Get chat history",
            "DELETE /api/chat/session/:id": "Clear a session's messages",
        },
    }))
}
