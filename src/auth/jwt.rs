//! Signed cookie tokens
//!
//! Session and flash cookies carry HS256 JWTs signed with the configured
//! secret, so a tampered or forged cookie is rejected before any lookup.

use crate::error::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Claims carried by the session cookie
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    /// Subject (username)
    pub sub: String,
    /// Server-side session id
    pub sid: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(username: &str, session_id: &str, lifetime: chrono::Duration) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: username.to_string(),
            sid: session_id.to_string(),
            iat: now,
            exp: now + lifetime.num_seconds(),
        }
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Signs and verifies tokens with one process-wide secret
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Create a signed token. Claims must include an `exp` field.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Validate signature and expiry, then decode the claims
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        Ok(decode::<T>(token, &self.decoding, &self.validation)?.claims)
    }
}
