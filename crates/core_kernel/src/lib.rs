//! Core Kernel - Foundational types shared by the CampusFind domains
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for users, items, and claims
//! - The caller identity context (`Actor`, `Role`) handed to every operation
//! - Display names joined onto item and claim reads (`PersonName`)
//! - Pagination arithmetic for listing endpoints
//! - Port abstractions (`PortError`, `DomainPort`, `HealthCheckable`)

pub mod identifiers;
pub mod actor;
pub mod person;
pub mod pagination;
pub mod ports;
pub mod error;

pub use identifiers::{UserId, ItemId, ClaimId};
pub use actor::{Actor, Role};
pub use person::PersonName;
pub use pagination::Pagination;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
