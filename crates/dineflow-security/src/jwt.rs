//! Dashboard owner tokens
//!
//! Owner tokens are issued by the external identity provider and signed with a
//! shared HS256 secret. This service only verifies them; `issue` exists for
//! local tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// `sub` is the identity provider's subject, kept opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerClaims {
    pub sub: String,
    pub tenant_id: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    secret: String,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn issue(
        &self,
        user_id: &Uuid,
        tenant_id: &Uuid,
        role: &str,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = OwnerClaims {
            sub: user_id.to_string(),
            tenant_id: *tenant_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::CreationError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<OwnerClaims, TokenError> {
        decode::<OwnerClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::ValidationError(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::new("secret".to_string());
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();

        let token = service.issue(&user_id, &tenant_id, "owner", 600).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.tenant_id, tenant_id);
        assert_eq!(claims.role, "owner");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret".to_string());
        let verifier = JwtService::new("other".to_string());
        let token = issuer.issue(&Uuid::new_v4(), &Uuid::new_v4(), "owner", 600).unwrap();

        assert!(matches!(verifier.verify(&token), Err(TokenError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new("secret".to_string());
        let token = service.issue(&Uuid::new_v4(), &Uuid::new_v4(), "owner", -3600).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::TokenExpired)));
    }

    #[test]
    fn test_opaque_subject_is_accepted() {
        let service = JwtService::new("secret".to_string());
        let now = Utc::now().timestamp();
        let claims = OwnerClaims {
            sub: "idp|owner-42".to_string(),
            tenant_id: Uuid::new_v4(),
            role: "owner".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();

        assert_eq!(service.verify(&token).unwrap().sub, "idp|owner-42");
    }
}
