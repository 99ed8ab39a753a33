//! # DineFlow API
//!
//! HTTP surface: handlers, extractors, response envelopes, middleware and the
//! router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Repositories};
