//! Authentication and authorization error types

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is inactive")]
    InactiveAccount,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("token signing failed: {0}")]
    SigningError(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// HTTP status the transport layer should answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MalformedHeader
            | Self::InvalidSignature
            | Self::Expired
            | Self::InvalidCredentials
            | Self::InactiveAccount => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Validation(_) => 400,
            Self::SigningError(_) | Self::Storage(_) | Self::Config(_) => 500,
        }
    }

    /// Failure to establish who the caller is
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        self.status_code() == 401
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Maps verification failures. Signing failures are mapped at the call site.
impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::InvalidSignature,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Conflict(msg) | StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
