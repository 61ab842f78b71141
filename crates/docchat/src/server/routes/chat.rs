//! Chat endpoints: ask, stream, history, clear

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::{ChatResponse, StreamEvent};

use super::user_id;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

/// POST /api/chat/message - ask a question
pub async fn message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let user = user_id(&headers);
    let response = state
        .engine()
        .ask_question(request.session_id, &request.message, user.as_deref())
        .await?;
    Ok(Json(response))
}

/// POST /api/chat/stream - ask a question, answer delivered as SSE
///
/// Emits `token` events followed by exactly one terminal `done` event, or a
/// single `error` event when the question cannot be answered.
pub async fn stream(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let user = user_id(&headers);
    let events = state
        .engine()
        .stream_answer(
            request.session_id,
            &request.message,
            user.as_deref(),
            &state.config().streaming,
        )
        .await;

    let sse_stream = events.map(|event| Ok::<_, Infallible>(to_sse_event(&event)));
    Sse::new(sse_stream).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &StreamEvent) -> Event {
    let sse = Event::default().event(event.name());
    sse.json_data(event)
        .unwrap_or_else(|_| Event::default().event("error").data("serialization failed"))
}

/// GET /api/chat/history/:id - ordered messages plus document info
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let session = state.engine().get_history(session_id)?;

    let messages: Vec<serde_json::Value> = session
        .messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "id": m.id,
                "role": m.role,
                "content": m.content,
                "timestamp": m.timestamp,
                "citations": m.citations,
            })
        })
        .collect();

    let documents: Vec<serde_json::Value> = session
        .documents
        .iter()
        .map(|d| {
            serde_json::json!({
                "id": d.id,
                "filename": d.filename,
                "pages": d.pages,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "messages": messages,
        "documents": documents,
    })))
}

/// DELETE /api/chat/session/:id - clear a session's messages
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.engine().clear_session(session_id)?;
    Ok(Json(serde_json::json!({
        "session_id": session_id,
        "message": "Session cleared successfully",
    })))
}
