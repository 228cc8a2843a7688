//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::auth::AccessTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("username already exists")]
    AlreadyExists,

    /// Unknown username or wrong password; the two are deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid access token")]
    InvalidToken(#[source] AccessTokenError),

    #[error("invalid registration: {0}")]
    Validation(&'static str),

    #[error("password hashing failed")]
    PasswordHash(#[source] argon2::password_hash::Error),

    #[error("password hashing task failed")]
    Task(#[from] JoinError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<AccessTokenError> for AuthServiceError {
    fn from(error: AccessTokenError) -> Self {
        Self::InvalidToken(error)
    }
}
