//! Domain services (business logic)

pub mod tenant_context;
pub mod guard;
pub mod reply;
pub mod session_service;
pub mod chat_service;
pub mod menu_service;

pub use tenant_context::{load_tenant, resolve_tenant, tenant_id_from_payload};
pub use guard::{Authorized, OriginGuard};
pub use reply::{CardView, ChatReply, ReplyDispatcher};
pub use session_service::{SessionGrant, SessionService};
pub use chat_service::ChatService;
pub use menu_service::{MenuService, MenuView};
