//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, ItemId, PortError};

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item is already claimed: {0}")]
    ItemAlreadyClaimed(ItemId),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Only pending claims can be cancelled (claim is {status})")]
    NotCancellable { status: ClaimStatus },

    #[error("Not authorized to {0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Port(#[from] PortError),
}
