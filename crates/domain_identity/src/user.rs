//! User account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Role, UserId};

/// A registered account
///
/// Carries no password hash; see [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    /// Derived from the institutional email suffix at registration
    pub is_verified: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user together with the stored password hash, for login only
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Registration input as submitted by the client
#[derive(Clone)]
pub struct Registration {
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("student_id", &self.student_id)
            .field("email", &self.email)
            .field("campus", &self.campus)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// A fully prepared account row, ready to persist
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: Role,
}

impl NewUser {
    /// Materializes the stored form of this account
    pub fn into_user(self, now: DateTime<Utc>) -> (User, String) {
        let user = User {
            id: self.id,
            student_id: self.student_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            campus: self.campus,
            program: self.program,
            is_verified: self.is_verified,
            role: self.role,
            created_at: now,
            updated_at: now,
        };
        (user, self.password_hash)
    }
}
