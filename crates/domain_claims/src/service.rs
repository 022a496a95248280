//! Claim use cases with actor authorization
//!
//! Authorization lives here; lifecycle rules and the item coupling are
//! enforced by the [`ClaimStore`] inside its unit of work.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::{Actor, ClaimId, ItemId};

use crate::claim::{Claim, ClaimAmendment, ClaimStatus};
use crate::details::ClaimDetails;
use crate::error::ClaimError;
use crate::ports::{CancelledClaim, ClaimStore};

#[derive(Clone)]
pub struct ClaimService {
    claims: Arc<dyn ClaimStore>,
}

impl ClaimService {
    pub fn new(claims: Arc<dyn ClaimStore>) -> Self {
        Self { claims }
    }

    /// Submits a claim on behalf of the actor
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn submit(&self, actor: &Actor, item_id: ItemId) -> Result<Claim, ClaimError> {
        let claim = self.claims.open_claim(item_id, actor.user_id).await?;
        info!(claim_id = %claim.id, item_id = %item_id, "Claim submitted");
        Ok(claim)
    }

    /// Reads a claim; visible to its claimer, the item owner, and staff
    pub async fn get(&self, actor: &Actor, id: ClaimId) -> Result<ClaimDetails, ClaimError> {
        let details = self
            .claims
            .find_claim_details(id)
            .await?
            .ok_or(ClaimError::ClaimNotFound(id))?;
        if !details.claim.involves(actor.user_id) && !actor.is_staff() {
            return Err(ClaimError::Forbidden("view this claim"));
        }
        Ok(details)
    }

    /// Staff review of a claim
    ///
    /// `status` must be a verification outcome. This is checked before the
    /// claim is looked up.
    #[instrument(skip(self, notes), fields(user_id = %actor.user_id))]
    pub async fn verify(
        &self,
        actor: &Actor,
        id: ClaimId,
        status: ClaimStatus,
        notes: Option<String>,
    ) -> Result<Claim, ClaimError> {
        if !actor.is_staff() {
            return Err(ClaimError::Forbidden("verify claims"));
        }
        if !status.is_verification_outcome() {
            return Err(ClaimError::InvalidStatus(status.to_string()));
        }

        let claim = self.claims.record_verification(id, status, notes).await?;
        info!(claim_id = %id, status = %status, "Claim verification recorded");
        Ok(claim)
    }

    /// Edits a claim; claimer or staff
    ///
    /// Only staff may change the status. A claimer may edit the notes.
    #[instrument(skip(self, amendment), fields(user_id = %actor.user_id))]
    pub async fn amend(
        &self,
        actor: &Actor,
        id: ClaimId,
        amendment: ClaimAmendment,
    ) -> Result<Claim, ClaimError> {
        let claim = self.load(id).await?;
        if !actor.is_self_or_staff(claim.claimer_id) {
            return Err(ClaimError::Forbidden("update this claim"));
        }
        if amendment.changes_status_of(&claim) && !actor.is_staff() {
            warn!(claim_id = %id, "Non-staff status change refused");
            return Err(ClaimError::Forbidden("change the status of this claim"));
        }

        self.claims.amend_claim(id, amendment).await
    }

    /// Withdraws a pending claim; claimer or staff
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn cancel(&self, actor: &Actor, id: ClaimId) -> Result<CancelledClaim, ClaimError> {
        let claim = self.load(id).await?;
        if !actor.is_self_or_staff(claim.claimer_id) {
            return Err(ClaimError::Forbidden("delete this claim"));
        }

        let cancelled = self.claims.cancel_claim(id).await?;
        info!(
            claim_id = %id,
            item_id = %cancelled.claim.item_id,
            item_status = ?cancelled.item_status,
            "Claim cancelled"
        );
        Ok(cancelled)
    }

    /// Claims against an item
    pub async fn for_item(&self, item_id: ItemId) -> Result<Vec<ClaimDetails>, ClaimError> {
        self.claims.claims_for_item(item_id).await
    }

    /// Claims the actor made or received as item owner
    pub async fn mine(&self, actor: &Actor) -> Result<Vec<ClaimDetails>, ClaimError> {
        self.claims.claims_for_user(actor.user_id).await
    }

    async fn load(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims
            .find_claim(id)
            .await?
            .ok_or(ClaimError::ClaimNotFound(id))
    }
}
