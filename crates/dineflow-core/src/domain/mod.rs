//! # DineFlow Core - Domain Module
//! 
//! Domain entities for the DineFlow platform.

pub mod tenant;
pub mod session;
pub mod menu_item;

pub use tenant::{Tenant, TenantId};
pub use session::Session;
pub use menu_item::{MenuItem, MenuSection};
