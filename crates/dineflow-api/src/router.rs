use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use dineflow_shared::constants::MAX_JSON_BODY_BYTES;

use crate::handlers;
use crate::middleware::{harden_errors, panic_response};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Health probes (no envelope)
    let health_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    let api_routes = Router::new()
        .route("/sessions", post(handlers::sessions::create_session))
        .route("/chat", post(handlers::chat::chat))
        .route("/menu", get(handlers::menu::get_menu))
        .route("/menu/items", post(handlers::menu::create_item))
        .route("/menu/items/{item_id}", patch(handlers::menu::update_item));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .fallback(handlers::fallback::route_not_found)
        .method_not_allowed_fallback(handlers::fallback::route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), harden_errors))
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        // The widget is embedded on tenant sites; allowlists are enforced per tenant.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
