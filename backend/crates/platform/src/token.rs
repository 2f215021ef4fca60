//! Session Tokens
//!
//! HS256-signed JWTs asserting a user's identity to subsequent requests.
//!
//! Claims: `sub` (user id as a decimal string), `name`, `iat`, `exp`.
//! A token is accepted while the verification time is strictly before
//! `exp`; no leeway is applied.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lifetime of an issued token
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;

#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret was configured
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, malformed token, or wrong algorithm
    #[error("Token is invalid: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Token has expired")]
    Expired,

    /// `sub` is not a user id
    #[error("Token subject is malformed")]
    MalformedSubject,
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// Parse the subject back into a numeric user id
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(TokenError::MalformedSubject)
    }
}

/// Signs and verifies session tokens with a symmetric secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        })
    }

    /// Issue a token for `user_id` as of `now`
    pub fn issue_at(
        &self,
        user_id: i64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify signature and expiry as of `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below without the library's leeway
        validation.validate_exp = false;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Invalid)?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
