//! Widget session tokens
//!
//! Tokens are opaque random strings handed to the browser exactly once.
//! Only their SHA-256 digest is persisted.

use rand::Rng;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
}

impl SessionToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill(&mut bytes);
        Self { value: hex::encode(bytes) }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn hash(&self) -> String {
        hash_token(&self.value)
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

/// Hex-encoded SHA-256 of a presented token.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_distinct() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), TOKEN_BYTES * 2);
    }

    #[test]
    fn test_hash_is_stable() {
        let token = SessionToken::generate();
        assert_eq!(token.hash(), hash_token(token.as_str()));
        assert_ne!(token.hash(), token.as_str());
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
