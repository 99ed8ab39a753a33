//! Widget session handlers

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::extract::{JsonPayload, RequestOrigin};
use crate::response::Envelope;
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    origin: RequestOrigin,
    JsonPayload(payload): JsonPayload,
) -> Result<Response, ApiError> {
    let grant = state
        .session_service
        .start(&payload, origin.as_deref())
        .await?;

    // Convenience only; the token in the body is what authorizes chat.
    let cookie = format!("{}={}; Path=/; SameSite=Lax", state.session_cookie_name, grant.session_id);
    let mut response = Json(Envelope::ok(grant)).into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}
