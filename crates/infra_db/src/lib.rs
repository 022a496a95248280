//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for CampusFind using SQLx.
//!
//! # Architecture
//!
//! Repositories own the SQL and speak in row types; adapters implement the
//! domain ports (`UserStore`, `ItemStore`, `ClaimStore`) on top of them and
//! translate rows into domain models.
//!
//! The pool is created once at start-up and handed to every adapter. Steps
//! that must share a transaction take the open `&mut PgConnection` instead
//! of the pool.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresItemAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/campusfind")).await?;
//! run_migrations(&pool).await?;
//! let items = PostgresItemAdapter::new(pool.clone());
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{
    PostgresUserAdapter, PostgresItemAdapter, PostgresClaimAdapter, PostgresHealthCheck,
};
