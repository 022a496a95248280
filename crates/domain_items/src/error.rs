//! Item domain errors

use thiserror::Error;

use core_kernel::{ItemId, PortError};

/// Errors that can occur in the item domain
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Not authorized to {0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Port(#[from] PortError),
}
