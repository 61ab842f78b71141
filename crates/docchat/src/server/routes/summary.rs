//! Document summarization endpoint

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::SummaryResponse;

/// POST /api/sessions/:id/summary - summarize a session's documents
pub async fn generate_summary(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SummaryResponse>> {
    let summary = state.engine().generate_summary(session_id).await?;
    Ok(Json(summary))
}
