//! # DineFlow Core
//! 
//! Domain entities, request validation, services, and repository traits for
//! the DineFlow ordering platform.

pub mod domain;
pub mod error;
pub mod inputs;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorCode, Issue};
