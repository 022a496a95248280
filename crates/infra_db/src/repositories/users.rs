//! User repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const USER_COLUMNS: &str = "id, student_id, email, first_name, last_name, campus, program, \
     password_hash, is_verified, role, created_at, updated_at";

/// Repository for user accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// True if either the email or the student id is taken
    pub async fn exists(&self, email: &str, student_id: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 OR student_id = $2)",
        )
        .bind(email)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Inserts a new account
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the email or student id is taken
    pub async fn insert(&self, user: NewUserRecord) -> Result<UserRow, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                id, student_id, email, first_name, last_name, campus, program,
                password_hash, is_verified, role
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(user.student_id)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.campus)
        .bind(user.program)
        .bind(user.password_hash)
        .bind(user.is_verified)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Staff,
}

/// Database row for a user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a user
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub id: Uuid,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campus: String,
    pub program: Option<String>,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: UserRole,
}
