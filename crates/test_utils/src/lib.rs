//! Test Utilities Crate
//!
//! Shared test infrastructure for the CampusFind test suites.
//!
//! # Modules
//!
//! - `memory`: In-memory implementation of every store port
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for domain invariants
//! - `generators`: Property-based strategies and fake data

pub mod memory;
pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use memory::InMemoryStore;
pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
