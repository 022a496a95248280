//! Identity Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, UserId};

use crate::user::{NewUser, User, UserCredentials};

/// Storage for user accounts
///
/// Emails are passed already normalized (see [`crate::policy::normalize_email`]).
#[async_trait]
pub trait UserStore: DomainPort {
    /// Finds a user by id
    async fn find_user(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Finds a user and their password hash by email
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, PortError>;

    /// True if any account already uses this email or student id
    async fn account_exists(&self, email: &str, student_id: &str) -> Result<bool, PortError>;

    /// Persists a new account
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` when the email or student id is already taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, PortError>;
}
