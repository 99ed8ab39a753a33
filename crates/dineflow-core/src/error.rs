//! Domain errors and the stable error code vocabulary

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Machine-readable codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    InvalidTenantId,
    Unauthorized,
    SessionInvalid,
    Forbidden,
    TenantInactive,
    OriginNotAllowed,
    NotFound,
    Conflict,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidTenantId => "INVALID_TENANT_ID",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::SessionInvalid => "SESSION_INVALID",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::TenantInactive => "TENANT_INACTIVE",
            ErrorCode::OriginNotAllowed => "ORIGIN_NOT_ALLOWED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status paired with the code.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::BadRequest | ErrorCode::InvalidTenantId => 400,
            ErrorCode::Unauthorized | ErrorCode::SessionInvalid => 401,
            ErrorCode::Forbidden | ErrorCode::TenantInactive | ErrorCode::OriginNotAllowed => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::InternalError => 500,
        }
    }

    /// Fixed text shown instead of the original message in hardened mode.
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "The request payload is invalid.",
            ErrorCode::InvalidTenantId => "The restaurant id is not valid.",
            ErrorCode::Unauthorized => "Authentication is required.",
            ErrorCode::SessionInvalid => "The chat session is invalid or has expired.",
            ErrorCode::Forbidden => "You do not have access to this resource.",
            ErrorCode::TenantInactive => "This restaurant is not currently active.",
            ErrorCode::OriginNotAllowed => "Requests from this site are not allowed.",
            ErrorCode::NotFound => "The requested resource was not found.",
            ErrorCode::Conflict => "The resource was changed or already exists.",
            ErrorCode::InternalError => "Something went wrong. Please try again.",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation problem, addressed by the canonical field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Validation failed with {} issue(s)", .0.len())]
    Validation(Vec<Issue>),

    #[error("Invalid tenant id: {0:?}")]
    InvalidTenantId(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Tenant not active: {0}")]
    TenantInactive(Uuid),

    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("Session invalid")]
    SessionInvalid,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::BadRequest,
            DomainError::InvalidTenantId(_) => ErrorCode::InvalidTenantId,
            DomainError::Unauthorized(_) => ErrorCode::Unauthorized,
            DomainError::Forbidden(_) => ErrorCode::Forbidden,
            DomainError::TenantInactive(_) => ErrorCode::TenantInactive,
            DomainError::OriginNotAllowed(_) => ErrorCode::OriginNotAllowed,
            DomainError::SessionInvalid => ErrorCode::SessionInvalid,
            DomainError::NotFound { .. } => ErrorCode::NotFound,
            DomainError::Conflict(_) => ErrorCode::Conflict,
            DomainError::DatabaseError(_) | DomainError::InternalError(_) => {
                ErrorCode::InternalError
            }
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Datastore or unexpected failures, as opposed to rejections of the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::DatabaseError(_) | DomainError::InternalError(_))
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            DomainError::Validation(issues) => issues,
            _ => &[],
        }
    }
}
