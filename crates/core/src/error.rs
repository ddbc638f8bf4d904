//! Service error taxonomy.

use thiserror::Error;

/// Result type used by every service-level operation.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error kinds surfaced to the transport boundary.
///
/// Access policy, auth and resource services return these without recovery;
/// the HTTP layer only maps kind → status code and a user-safe message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A required field was missing or malformed.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Missing, malformed, badly signed or expired token.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but the access policy denies the operation.
    #[error("forbidden")]
    Forbidden,

    /// The requested id does not resolve to a record.
    #[error("not found")]
    NotFound,

    /// Registration (or admin creation) with an email that already exists.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// Login failed. Unknown email and wrong password are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Persistence or internal failure.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "validation_failed",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::DuplicateEmail => "duplicate_email",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Unexpected(format!("serialization: {value}"))
    }
}
