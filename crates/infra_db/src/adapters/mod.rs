//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements its domain's store trait
//! - Translates between domain models and repository row types
//! - Converts [`crate::DatabaseError`] into `PortError`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_items::ItemStore;
//! use infra_db::adapters::PostgresItemAdapter;
//!
//! let items: Arc<dyn ItemStore> = Arc::new(PostgresItemAdapter::new(pool));
//! ```

pub mod users;
pub mod items;
pub mod claims;
pub mod health;

pub use users::PostgresUserAdapter;
pub use items::PostgresItemAdapter;
pub use claims::PostgresClaimAdapter;
pub use health::PostgresHealthCheck;
