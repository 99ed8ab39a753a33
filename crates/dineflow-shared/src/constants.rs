//! Application-wide constants

pub const MAX_TAG_LENGTH: usize = 32;

/// Cards returned by a single chat reply.
pub const MAX_REPLY_CARDS: usize = 3;

/// Section name for menu items that were never assigned one.
pub const DEFAULT_SECTION_NAME: &str = "Other";

pub const DEFAULT_SESSION_COOKIE: &str = "dineflow_session";
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;
