//! Request extractors. Each rejects with an [`ApiError`] so every failure is
//! rendered as an envelope.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
};
use serde_json::{Map, Value};
use tracing::debug;

use dineflow_core::services::guard::request_origin;
use dineflow_security::{OwnerClaims, TokenError};

use crate::error::ApiError;
use crate::state::AppState;

/// Origin of the calling page, from `Origin` or else `Referer`.
#[derive(Debug, Clone)]
pub struct RequestOrigin(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for RequestOrigin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_str = |name: header::HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());
        Ok(RequestOrigin(request_origin(
            header_str(header::ORIGIN),
            header_str(header::REFERER),
        )))
    }
}

impl RequestOrigin {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Raw JSON body, validated later by the core. An empty body is `{}`.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request("", e.body_text()))?;

        if bytes.is_empty() {
            return Ok(JsonPayload(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes).map(JsonPayload).map_err(|e| {
            debug!("Malformed JSON body: {}", e);
            ApiError::bad_request("", format!("malformed JSON: {}", e))
        })
    }
}

/// Query string as a JSON object of strings.
#[derive(Debug, Clone)]
pub struct QueryPayload(pub Value);

impl<S: Send + Sync> FromRequestParts<S> for QueryPayload {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::bad_request("", e.body_text()))?;

        let object: Map<String, Value> = params
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Ok(QueryPayload(Value::Object(object)))
    }
}

/// Verified dashboard owner from `Authorization: Bearer <jwt>`.
#[derive(Debug, Clone)]
pub struct OwnerAuth(pub OwnerClaims);

impl FromRequestParts<AppState> for OwnerAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

        state.jwt.verify(token).map(OwnerAuth).map_err(|e| match e {
            TokenError::TokenExpired => ApiError::unauthorized("owner token expired"),
            other => ApiError::unauthorized(other.to_string()),
        })
    }
}
