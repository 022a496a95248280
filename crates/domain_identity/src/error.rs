//! Identity domain errors

use thiserror::Error;

use core_kernel::{PortError, UserId};

/// Errors that can occur in the identity domain
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("User already exists: {0}")]
    DuplicateAccount(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for IdentityError {
    fn from(err: PortError) -> Self {
        match err {
            // Unique constraints on email and student id
            PortError::Conflict { message } => IdentityError::DuplicateAccount(message),
            other => IdentityError::Port(other),
        }
    }
}
