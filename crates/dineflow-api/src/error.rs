//! Failure envelope rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use dineflow_core::error::{DomainError, ErrorCode};

/// Every route error. Rendered in development form; the hardening middleware
/// re-renders it when the server runs in production.
#[derive(Error, Debug, Clone)]
#[error(transparent)]
pub struct ApiError(#[from] DomainError);

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    pub fn domain(&self) -> &DomainError {
        &self.0
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// `{ ok: false, code, message, issues?, detail? }`
    pub fn body(&self, hardened: bool) -> Value {
        let code = self.code();
        let mut body = Map::new();
        body.insert("ok".to_string(), Value::Bool(false));
        body.insert("code".to_string(), json!(code));

        let message = if hardened {
            code.public_message().to_string()
        } else {
            self.0.to_string()
        };
        body.insert("message".to_string(), Value::String(message));

        if let DomainError::Validation(issues) = &self.0 {
            body.insert("issues".to_string(), json!(issues));
        }

        if !hardened {
            if let DomainError::DatabaseError(detail) | DomainError::InternalError(detail) = &self.0 {
                body.insert("detail".to_string(), Value::String(detail.clone()));
            }
        }

        Value::Object(body)
    }

    pub fn render(&self, hardened: bool) -> Response {
        let mut response = (self.status(), Json(self.body(hardened))).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }

    pub fn bad_request(path: &str, message: impl Into<String>) -> Self {
        ApiError(DomainError::Validation(vec![dineflow_core::Issue::new(path, message)]))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError(DomainError::Unauthorized(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        if code.is_server_error() {
            tracing::error!("{}: {:?}", code, self.0);
        } else {
            tracing::warn!("{}: {}", code, self.0);
        }
        self.render(false)
    }
}
