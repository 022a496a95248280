//! Claims Domain Ports
//!
//! [`ClaimStore`] is the claim module's only view of persistence. Its
//! composite operations (`open_claim`, `cancel_claim`) touch both the claim
//! and the item and must be atomic: implementations run them in a single
//! transaction (PostgreSQL) or under a single lock (in-memory), applying
//! the rules in [`crate::claim`] between the read and the writes.

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, ItemId, UserId};
use domain_items::ItemStatus;

use crate::claim::{Claim, ClaimAmendment, ClaimStatus};
use crate::details::ClaimDetails;
use crate::error::ClaimError;

/// Outcome of cancelling a claim
#[derive(Debug, Clone)]
pub struct CancelledClaim {
    /// The claim as it was before deletion
    pub claim: Claim,
    /// Status written to the item, if it changed
    pub item_status: Option<ItemStatus>,
}

/// Storage for claims, coupled to the item status
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Opens a pending claim and marks the item claimed
    ///
    /// # Errors
    ///
    /// * `ItemNotFound` - the item does not exist
    /// * `ItemAlreadyClaimed` - the item is already claimed
    async fn open_claim(&self, item_id: ItemId, claimer_id: UserId) -> Result<Claim, ClaimError>;

    /// Finds a claim by id
    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError>;

    /// Finds a claim with its item and the names of both parties
    async fn find_claim_details(&self, id: ClaimId) -> Result<Option<ClaimDetails>, ClaimError>;

    /// Records a verification outcome; the item is not touched
    async fn record_verification(
        &self,
        id: ClaimId,
        status: ClaimStatus,
        notes: Option<String>,
    ) -> Result<Claim, ClaimError>;

    /// Applies a partial update; the item is not touched
    async fn amend_claim(
        &self,
        id: ClaimId,
        amendment: ClaimAmendment,
    ) -> Result<Claim, ClaimError>;

    /// Deletes a pending claim, returning the item to `found` when it was
    /// the last claim against it
    ///
    /// # Errors
    ///
    /// * `ClaimNotFound` - the claim does not exist
    /// * `NotCancellable` - the claim is no longer pending
    async fn cancel_claim(&self, id: ClaimId) -> Result<CancelledClaim, ClaimError>;

    /// Claims against an item, newest first
    async fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimDetails>, ClaimError>;

    /// Claims where the user is claimer or owner, newest first
    async fn claims_for_user(&self, user_id: UserId) -> Result<Vec<ClaimDetails>, ClaimError>;
}
