//! Menu browsing and dashboard menu management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use dineflow_core::domain::MenuItem;
use dineflow_core::services::MenuView;

use crate::error::ApiError;
use crate::extract::{JsonPayload, OwnerAuth, QueryPayload};
use crate::response::Envelope;
use crate::state::AppState;

/// GET /api/v1/menu
pub async fn get_menu(
    State(state): State<AppState>,
    QueryPayload(query): QueryPayload,
) -> Result<Json<Envelope<MenuView>>, ApiError> {
    let view = state.menu_service.browse(&query).await?;
    Ok(Json(Envelope::ok(view)))
}

/// POST /api/v1/menu/items
pub async fn create_item(
    State(state): State<AppState>,
    OwnerAuth(claims): OwnerAuth,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Envelope<MenuItem>>), ApiError> {
    let item = state.menu_service.create_item(&claims, &payload).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(item))))
}

/// PATCH /api/v1/menu/items/{itemId}
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    OwnerAuth(claims): OwnerAuth,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Envelope<MenuItem>>, ApiError> {
    let item = state
        .menu_service
        .update_item(&claims, &item_id, &payload)
        .await?;
    Ok(Json(Envelope::ok(item)))
}
