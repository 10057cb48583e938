//! Authentication error types.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::user::UserValidationError;
use crate::services::password::PasswordHashError;
use crate::services::token::TokenIssueError;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid registration or update input.
    #[error("invalid input: {0}")]
    Validation(#[from] UserValidationError),

    /// Wrong password or no such user - deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Unverifiable token, or a token whose subject no longer exists.
    #[error("invalid token")]
    InvalidToken,

    /// Password hashing error.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    /// Token signing error.
    #[error(transparent)]
    Token(#[from] TokenIssueError),

    /// Store/repository error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
