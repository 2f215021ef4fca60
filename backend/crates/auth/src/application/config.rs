//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::{DEFAULT_TOKEN_TTL_HOURS, TokenCodec, TokenError};

use crate::error::{AuthError, AuthResult};

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 session tokens
    pub token_secret: Option<Vec<u8>>,
    /// Session token lifetime (72 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS as u64 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: Some(secret.to_vec()),
            ..Default::default()
        }
    }

    /// Create config for development (tokens do not survive a restart)
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the token codec; fails when no secret is configured
    pub fn token_codec(&self) -> AuthResult<TokenCodec> {
        let secret = self
            .token_secret
            .as_deref()
            .ok_or(AuthError::Signing(TokenError::MissingSecret))?;
        let ttl = chrono::Duration::from_std(self.token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {}", e)))?;

        TokenCodec::new(secret, ttl).map_err(AuthError::Signing)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "token_secret",
                &self.token_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_ttl", &self.token_ttl)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
