//! # DineFlow Security
//! 
//! Widget session tokens and dashboard owner token verification.

pub mod jwt;
pub mod session;

pub use jwt::{OwnerClaims, JwtService, TokenError};
pub use session::{SessionToken, hash_token};
