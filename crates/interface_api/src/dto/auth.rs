//! Account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use core_kernel::{Role, UserId};
use domain_identity::{Registration, User};

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 20, message = "Student ID is required (max 20 characters)"))]
    pub student_id: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50, message = "Campus is required"))]
    pub campus: String,
    #[validate(length(max = 100))]
    pub program: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            student_id: req.student_id,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            campus: req.campus,
            program: req.program,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of an account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    pub is_verified: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            student_id: user.student_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            campus: user.campus,
            program: user.program,
            is_verified: user.is_verified,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Register and login reply
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserResponse,
}
