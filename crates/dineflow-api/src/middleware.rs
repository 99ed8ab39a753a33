//! Error hardening and panic rendering

use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::error;

use dineflow_core::error::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// Re-renders error envelopes with fixed public messages when hardened.
pub async fn harden_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !state.hardened {
        return response;
    }

    let hardened = response
        .extensions()
        .get::<ApiError>()
        .map(|err| err.render(true));
    hardened.unwrap_or(response)
}

/// `CatchPanicLayer` handler: a panicking handler becomes `INTERNAL_ERROR`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", detail);
    ApiError::from(DomainError::InternalError(format!("handler panicked: {}", detail))).render(false)
}
