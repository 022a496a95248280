//! Claims Domain
//!
//! A claim is a user's assertion that they own a found item. Claims move
//! through a small lifecycle and keep the claimed item's status in step.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Verified -> Completed
//!         -> Rejected
//!         -> Completed
//! ```
//!
//! Opening a claim marks the item `claimed`; cancelling the last pending
//! claim returns it to `found`. Both writes happen atomically inside the
//! [`ClaimStore`] implementation.

pub mod claim;
pub mod details;
pub mod ports;
pub mod service;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimAmendment, item_status_after_cancel};
pub use details::{ClaimDetails, ClaimedItem};
pub use ports::{ClaimStore, CancelledClaim};
pub use service::ClaimService;
pub use error::ClaimError;
