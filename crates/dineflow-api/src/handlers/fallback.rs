//! Envelope responses for paths and methods no route serves

use axum::http::Uri;
use dineflow_core::error::DomainError;

use crate::error::ApiError;

/// Unknown path, or a known path with an unsupported method.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::from(DomainError::not_found("Route", uri.path()))
}
