//! Widget chat handler

use axum::{extract::State, Json};
use serde::Serialize;

use dineflow_core::services::ChatReply;

use crate::error::ApiError;
use crate::extract::{JsonPayload, RequestOrigin};
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ChatReply,
}

/// POST /api/v1/chat
pub async fn chat(
    State(state): State<AppState>,
    origin: RequestOrigin,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Envelope<ChatResponse>>, ApiError> {
    let reply = state.chat_service.reply(&payload, origin.as_deref()).await?;
    Ok(Json(Envelope::ok(ChatResponse { reply })))
}
