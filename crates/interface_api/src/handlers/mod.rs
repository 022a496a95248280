//! Request handlers, one module per resource

pub mod auth;
pub mod items;
pub mod claims;
pub mod health;
