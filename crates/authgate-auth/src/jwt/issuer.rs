//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;

use super::claims::Claims;

/// Creates signed, time-bounded bearer tokens.
///
/// Issuance is a pure function of the identity ID, the current time, and
/// the server secret; there are no side effects.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in seconds.
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: config.jwt_ttl_seconds as i64,
        }
    }

    /// Issues a signed token bound to the given identity.
    pub fn issue(&self, identity_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity_id,
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issues a token with explicit claims. Test-only escape hatch for
    /// crafting already-expired tokens.
    #[cfg(test)]
    pub(crate) fn issue_with_claims(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
