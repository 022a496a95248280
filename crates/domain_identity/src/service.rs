//! Account use cases

use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::{Role, UserId};

use crate::error::IdentityError;
use crate::password;
use crate::policy::{normalize_email, AccountPolicy};
use crate::ports::UserStore;
use crate::user::{NewUser, Registration, User};

/// Registration, login, and profile lookup
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    policy: AccountPolicy,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, policy: AccountPolicy) -> Self {
        Self { users, policy }
    }

    /// Registers a new student account
    ///
    /// # Errors
    ///
    /// * `DuplicateAccount` - email or student id already registered
    #[instrument(skip(self, registration), fields(student_id = %registration.student_id))]
    pub async fn register(&self, registration: Registration) -> Result<User, IdentityError> {
        let email = normalize_email(&registration.email);
        let student_id = registration.student_id.trim().to_string();

        if self.users.account_exists(&email, &student_id).await? {
            warn!("Registration rejected: account exists");
            return Err(IdentityError::DuplicateAccount(email));
        }

        let password_hash = password::hash_password(&registration.password)?;
        let is_verified = self.policy.is_verified_email(&email);

        let user = self
            .users
            .insert_user(NewUser {
                id: UserId::new_v7(),
                student_id,
                email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                campus: registration.campus,
                program: registration.program,
                password_hash,
                is_verified,
                role: Role::Student,
            })
            .await?;

        info!(user_id = %user.id, is_verified, "User registered");
        Ok(user)
    }

    /// Checks an email/password pair
    ///
    /// Unknown emails and wrong passwords yield the same error.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let credentials = self
            .users
            .find_credentials(&normalize_email(email))
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !password::verify_password(&credentials.password_hash, password) {
            warn!(user_id = %credentials.user.id, "Login rejected: bad password");
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(credentials.user)
    }

    /// Loads the profile of an authenticated user
    pub async fn profile(&self, id: UserId) -> Result<User, IdentityError> {
        self.users
            .find_user(id)
            .await?
            .ok_or(IdentityError::UserNotFound(id))
    }
}
