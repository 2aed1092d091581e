use crate::auth::{JwtError, PasswordError};
use crate::database::DatabaseError;

/// Typed failure reasons returned by the domain services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] JwtError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}
