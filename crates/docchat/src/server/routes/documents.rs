//! Document upload and session-document management

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::document::Document;

use super::user_id;

/// Upload request: the document's text as extracted by the client layer
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub text: String,
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub session_id: Uuid,
    pub filename: String,
    pub pages: u32,
    pub chunks: usize,
    pub message: String,
}

/// Summary view of an attached document
#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    pub id: Uuid,
    pub filename: String,
    pub pages: u32,
    pub chunks: usize,
}

impl From<&Document> for DocumentInfo {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            pages: doc.pages,
            chunks: doc.chunks.len(),
        }
    }
}

fn build_document(state: &AppState, request: &UploadRequest) -> Result<Arc<Document>> {
    let extracted = state
        .extractor()
        .extract(request.text.as_bytes(), &request.filename)?;
    Ok(Arc::new(Document::from_extracted(
        request.filename.clone(),
        extracted,
        state.config().chunking.max_chunk_size,
    )))
}

/// POST /api/documents - upload a document and open a session around it
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>> {
    let document = build_document(&state, &request)?;
    let user = user_id(&headers);
    let session = state
        .engine()
        .create_session(Arc::clone(&document), user.as_deref())
        .await;

    tracing::info!(
        "uploaded {} ({} chunks), session {}",
        document.filename,
        document.chunks.len(),
        session.id
    );

    Ok(Json(UploadResponse {
        document_id: document.id,
        session_id: session.id,
        filename: document.filename.clone(),
        pages: document.pages,
        chunks: document.chunks.len(),
        message: "Document uploaded and processed successfully".to_string(),
    }))
}

/// POST /api/sessions/:id/documents - attach another document
pub async fn add_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>> {
    let document = build_document(&state, &request)?;
    let user = user_id(&headers);
    state
        .engine()
        .add_document(session_id, Arc::clone(&document), user.as_deref())
        .await?;

    Ok(Json(UploadResponse {
        document_id: document.id,
        session_id,
        filename: document.filename.clone(),
        pages: document.pages,
        chunks: document.chunks.len(),
        message: "Document added to session".to_string(),
    }))
}

/// GET /api/sessions/:id/documents - list a session's documents
pub async fn list_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentInfo>>> {
    let documents = state.engine().list_documents(session_id)?;
    Ok(Json(documents.iter().map(|d| DocumentInfo::from(d.as_ref())).collect()))
}

/// DELETE /api/sessions/:id/documents/:doc_id - detach a document
pub async fn remove_document(
    State(state): State<AppState>,
    Path((session_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    state.engine().remove_document(session_id, document_id)?;
    Ok(Json(serde_json::json!({
        "session_id": session_id,
        "document_id": document_id,
        "message": "Document removed from session",
    })))
}

/// DELETE /api/sessions/:id - delete a session entirely
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.engine().delete_session(session_id)?;
    Ok(Json(serde_json::json!({
        "session_id": session_id,
        "message": "Session deleted",
    })))
}
