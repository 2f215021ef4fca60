//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is the plaintext from a request (zeroized on drop)
//! - [`UserPassword`] is the Argon2id PHC string kept in `users.password_hash`

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Validation Rules
    /// - Required (not empty or whitespace only)
    /// - Maximum 100 characters
    /// - No control characters
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::EmptyOrWhitespace => "Password is required".to_string(),
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {} characters", max)
                }
                PasswordPolicyError::InvalidCharacter => {
                    "Password contains invalid characters".to_string()
                }
            };
            AuthError::Validation(message)
        })?;

        Ok(Self(clear_text))
    }

    /// An empty or absent password on update means "keep the current one".
    pub fn optional(raw: Option<String>) -> AuthResult<Option<Self>> {
        match raw {
            Some(raw) if !raw.is_empty() => Self::new(raw).map(Some),
            _ => Ok(None),
        }
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(AuthError::Hashing)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(AuthError::Hashing)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Burn one verification against a throwaway hash.
    ///
    /// Used when there is no stored hash to compare against.
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) {
        if let Some(dummy) = HashedPassword::dummy() {
            let _ = dummy.verify(raw.inner(), pepper);
        }
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
