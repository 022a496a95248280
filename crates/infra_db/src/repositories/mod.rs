//! Repository implementations for the CampusFind tables
//!
//! Repositories encapsulate the SQL and map rows to plain row structs; they
//! know nothing about the domain crates. Queries are built at runtime with
//! bound parameters.
//!
//! Methods on a repository value run against its pool. Associated functions
//! taking `&mut PgConnection` run inside a caller-owned transaction.

pub mod users;
pub mod items;
pub mod claims;

pub use users::UserRepository;
pub use items::ItemRepository;
pub use claims::ClaimRepository;
