//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HubdeskError`] via `#[from]`.

/// Top-level error returned by domain logic, services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HubdeskError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("authentication error")]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("gateway error")]
    Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("password hashing failed")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// A request field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("address must not be empty")]
    EmptyAddress,

    #[error("hub must not be empty")]
    EmptyHub,

    #[error("setting must not be empty")]
    EmptySetting,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("{field} is already taken")]
    AlreadyTaken { field: &'static str },

    #[error("invalid {field}")]
    InvalidField { field: &'static str },

    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The caller is unauthenticated or not allowed to perform the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("forbidden")]
    Forbidden,
}

impl AuthError {
    /// Whether the caller is authenticated but lacks permission.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}
