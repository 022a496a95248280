//! PostgreSQL User Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError, Role, UserId};
use domain_identity::{NewUser, User, UserCredentials, UserStore};

use crate::error::to_port_error;
use crate::repositories::users::{NewUserRecord, UserRepository, UserRole as DbUserRole, UserRow};

/// PostgreSQL-backed implementation of [`UserStore`]
#[derive(Debug, Clone)]
pub struct PostgresUserAdapter {
    repository: UserRepository,
}

impl PostgresUserAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresUserAdapter {}

#[async_trait]
impl UserStore for PostgresUserAdapter {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_user(&self, id: UserId) -> Result<Option<User>, PortError> {
        let row = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(|row| split_row(row).0))
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, PortError> {
        let row = self
            .repository
            .find_by_email(email)
            .await
            .map_err(to_port_error)?;

        Ok(row.map(|row| {
            let (user, password_hash) = split_row(row);
            UserCredentials { user, password_hash }
        }))
    }

    async fn account_exists(&self, email: &str, student_id: &str) -> Result<bool, PortError> {
        self.repository
            .exists(email, student_id)
            .await
            .map_err(to_port_error)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert_user(&self, user: NewUser) -> Result<User, PortError> {
        debug!("Inserting user");

        let row = self
            .repository
            .insert(NewUserRecord {
                id: user.id.into(),
                student_id: user.student_id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                campus: user.campus,
                program: user.program,
                password_hash: user.password_hash,
                is_verified: user.is_verified,
                role: user.role.into(),
            })
            .await
            .map_err(to_port_error)?;

        Ok(split_row(row).0)
    }
}

impl From<DbUserRole> for Role {
    fn from(role: DbUserRole) -> Self {
        match role {
            DbUserRole::Student => Role::Student,
            DbUserRole::Staff => Role::Staff,
        }
    }
}

impl From<Role> for DbUserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => DbUserRole::Student,
            Role::Staff => DbUserRole::Staff,
        }
    }
}

/// Separates the stored hash from the user profile
fn split_row(row: UserRow) -> (User, String) {
    let user = User {
        id: UserId::from(row.id),
        student_id: row.student_id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        campus: row.campus,
        program: row.program,
        is_verified: row.is_verified,
        role: row.role.into(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    (user, row.password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_db_enum() {
        for role in [Role::Student, Role::Staff] {
            assert_eq!(Role::from(DbUserRole::from(role)), role);
        }
    }
}
