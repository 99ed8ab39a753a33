//! HTTP handlers

pub mod health;
pub mod sessions;
pub mod chat;
pub mod menu;
pub mod fallback;
