//! User — account holder and root of hub ownership.

use serde::{Deserialize, Serialize};

use crate::error::{HubdeskError, ValidationError};
use crate::id::UserId;
use crate::time::{Timestamp, minutes_from_now, now};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// How long a password-reset token stays valid.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

/// bcrypt work factor for stored passwords.
pub const BCRYPT_COST: u32 = 10;

/// A bcrypt-encoded password hash (`$2b$<cost>$<salt+digest>`).
///
/// The salt and cost live inside the encoded string, so storage keeps a
/// single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PasswordTooShort`] for short passwords, or
    /// [`HubdeskError::Hashing`] if bcrypt fails.
    pub fn new(password: &str) -> Result<Self, HubdeskError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        let encoded = bcrypt::hash(password, BCRYPT_COST)?;
        Ok(Self(encoded))
    }

    /// Wrap a hash previously produced by [`PasswordHash::new`].
    #[must_use]
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded form, as persisted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check `password` against the stored hash.
    ///
    /// A malformed stored hash never verifies.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }
}

/// Generate an opaque random token (64 hex chars).
#[must_use]
pub fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// Pending password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token: String,
    pub expires_at: Timestamp,
}

impl PasswordReset {
    /// Issue a new reset token.
    #[must_use]
    pub fn issue() -> Self {
        Self {
            token: generate_token(),
            expires_at: minutes_from_now(RESET_TOKEN_TTL_MINUTES),
        }
    }

    /// Whether the token is still usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.expires_at > now()
    }
}

/// A registered account.
///
/// Only the id, email, profile and creation time are ever serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userID")]
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub password: PasswordHash,
    pub profile: Profile,
    #[serde(skip)]
    pub reset: Option<PasswordReset>,
    pub created_at: Timestamp,
}

impl User {
    /// Create a new account with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] for malformed email or short password.
    pub fn new(email: &str, password: &str, profile: Profile) -> Result<Self, HubdeskError> {
        let email = normalize_email(email)?;
        Ok(Self {
            id: UserId::new(),
            email,
            password: PasswordHash::new(password)?,
            profile,
            reset: None,
            created_at: now(),
        })
    }

    /// Replace the password, dropping any pending reset.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PasswordTooShort`] for short passwords.
    pub fn set_password(&mut self, password: &str) -> Result<(), HubdeskError> {
        self.password = PasswordHash::new(password)?;
        self.reset = None;
        Ok(())
    }
}

/// Lowercase and sanity-check an email address.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] unless the address has a
/// non-empty local part and a dotted domain.
pub fn normalize_email(email: &str) -> Result<String, HubdeskError> {
    let email = email.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') =>
        {
            Ok(email)
        }
        _ => Err(ValidationError::InvalidEmail.into()),
    }
}

/// An authenticated login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(rename = "userID")]
    pub user: UserId,
    pub created_at: Timestamp,
}

impl Session {
    /// Open a session for `user`.
    #[must_use]
    pub fn open(user: UserId) -> Self {
        Self {
            token: generate_token(),
            user,
            created_at: now(),
        }
    }
}
