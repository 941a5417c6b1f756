//! Error types for the account service.

use roster_database::DatabaseError;
use thiserror::Error;

/// Failures returned by [`AccountService`](crate::AccountService) operations.
///
/// The messages are stable and never carry storage detail; the underlying
/// cause is logged where the failure is raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Coarse classification of an [`AccountError`] for transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Invalid,
    Conflict,
    NotFound,
    Unauthorized,
    Unavailable,
}

impl ErrorKind {
    /// HTTP status a transport should answer with.
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::Invalid => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Unavailable => 503,
        }
    }

    /// Short response label a transport should answer with.
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::Invalid => "bad request",
            ErrorKind::Unauthorized => "invalid credentials",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "already exists",
            ErrorKind::Unavailable => "service error",
        }
    }
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Invalid(_) => ErrorKind::Invalid,
            AccountError::Conflict(_) => ErrorKind::Conflict,
            AccountError::NotFound(_) => ErrorKind::NotFound,
            AccountError::Unauthorized => ErrorKind::Unauthorized,
            AccountError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    pub(crate) fn cancelled() -> Self {
        AccountError::Unavailable("operation cancelled".to_string())
    }
}

impl From<DatabaseError> for AccountError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Duplicate(entity) => AccountError::Conflict(entity),
            DatabaseError::NotFound(entity) => AccountError::NotFound(entity),
            DatabaseError::ConnectionError(_) | DatabaseError::MigrationError(_) => {
                AccountError::Unavailable("storage unreachable".to_string())
            }
            DatabaseError::QueryError(_) => {
                AccountError::Unavailable("storage request failed".to_string())
            }
        }
    }
}
