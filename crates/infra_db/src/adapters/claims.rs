//! PostgreSQL Claim Adapter
//!
//! Every write runs in one transaction. Row locks are always taken item
//! first, then claim, the same order an item delete takes when its claims
//! cascade, so concurrent writers serialize instead of deadlocking. Two
//! callers racing to claim the same item queue on the item lock and the
//! loser sees it `claimed`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use core_kernel::{ClaimId, DomainPort, ItemId, PersonName, UserId};
use domain_claims::{
    item_status_after_cancel, CancelledClaim, Claim, ClaimAmendment, ClaimDetails, ClaimError,
    ClaimStatus, ClaimStore, ClaimedItem,
};
use domain_items::ItemStatus;

use crate::adapters::items::item_from_row;
use crate::error::to_port_error;
use crate::repositories::claims::{
    ClaimDetailsRow, ClaimRepository, ClaimReview, ClaimRow, ClaimStatus as DbClaimStatus,
    NewClaimRecord,
};
use crate::repositories::items::ItemRepository;

/// PostgreSQL-backed implementation of [`ClaimStore`]
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimRepository::new(pool.clone()),
            pool,
        }
    }

    /// Locks the claim, applies `change`, and writes status and notes back
    /// before the lock is released
    async fn revise<F>(&self, id: ClaimId, change: F) -> Result<Claim, ClaimError>
    where
        F: FnOnce(&mut Claim) -> Result<(), ClaimError> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(to_port_error)?;

        let mut claim = ClaimRepository::lock_for_update(&mut tx, id.into())
            .await
            .map_err(to_port_error)?
            .map(claim_from_row)
            .ok_or(ClaimError::ClaimNotFound(id))?;

        change(&mut claim)?;

        let review = ClaimReview {
            id: claim.id.into(),
            status: claim.status.into(),
            verification_notes: claim.verification_notes.clone(),
            updated_at: claim.updated_at,
        };
        let row = ClaimRepository::save_review_on(&mut tx, review)
            .await
            .map_err(to_port_error)?
            .ok_or(ClaimError::ClaimNotFound(id))?;

        tx.commit().await.map_err(to_port_error)?;
        Ok(claim_from_row(row))
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl ClaimStore for PostgresClaimAdapter {
    #[instrument(skip(self), fields(item_id = %item_id, claimer_id = %claimer_id))]
    async fn open_claim(&self, item_id: ItemId, claimer_id: UserId) -> Result<Claim, ClaimError> {
        let mut tx = self.pool.begin().await.map_err(to_port_error)?;

        let item = ItemRepository::lock_for_update(&mut tx, item_id.into())
            .await
            .map_err(to_port_error)?
            .map(item_from_row)
            .ok_or(ClaimError::ItemNotFound(item_id))?;

        let claim = Claim::open(&item, claimer_id)?;

        let row = ClaimRepository::insert_on(
            &mut tx,
            NewClaimRecord {
                id: claim.id.into(),
                item_id: claim.item_id.into(),
                claimer_id: claim.claimer_id.into(),
                owner_id: claim.owner_id.map(Into::into),
                status: claim.status.into(),
                verification_notes: claim.verification_notes.clone(),
                created_at: claim.created_at,
            },
        )
        .await
        .map_err(to_port_error)?;

        ItemRepository::set_status_on(&mut tx, item_id.into(), ItemStatus::Claimed.into())
            .await
            .map_err(to_port_error)?;

        tx.commit().await.map_err(to_port_error)?;
        debug!(claim_id = %claim.id, "Claim opened");

        Ok(claim_from_row(row))
    }

    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        let row = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(claim_from_row))
    }

    async fn find_claim_details(&self, id: ClaimId) -> Result<Option<ClaimDetails>, ClaimError> {
        let row = self
            .repository
            .get_details(id.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(claim_details_from_row))
    }

    #[instrument(skip(self, notes), fields(claim_id = %id))]
    async fn record_verification(
        &self,
        id: ClaimId,
        status: ClaimStatus,
        notes: Option<String>,
    ) -> Result<Claim, ClaimError> {
        self.revise(id, |claim| claim.record_verification(status, notes)).await
    }

    #[instrument(skip(self, amendment), fields(claim_id = %id))]
    async fn amend_claim(
        &self,
        id: ClaimId,
        amendment: ClaimAmendment,
    ) -> Result<Claim, ClaimError> {
        self.revise(id, |claim| {
            claim.amend(&amendment);
            Ok(())
        })
        .await
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn cancel_claim(&self, id: ClaimId) -> Result<CancelledClaim, ClaimError> {
        // The item id never changes, so it may be read before any lock
        let item_id = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(to_port_error)?
            .map(|row| row.item_id)
            .ok_or(ClaimError::ClaimNotFound(id))?;

        let mut tx = self.pool.begin().await.map_err(to_port_error)?;

        // A missing item means the claim was removed with it
        ItemRepository::lock_for_update(&mut tx, item_id)
            .await
            .map_err(to_port_error)?
            .ok_or(ClaimError::ClaimNotFound(id))?;

        let claim = ClaimRepository::lock_for_update(&mut tx, id.into())
            .await
            .map_err(to_port_error)?
            .map(claim_from_row)
            .ok_or(ClaimError::ClaimNotFound(id))?;

        claim.ensure_cancellable()?;

        ClaimRepository::delete_on(&mut tx, id.into())
            .await
            .map_err(to_port_error)?;

        let remaining = ClaimRepository::count_for_item_on(&mut tx, item_id)
            .await
            .map_err(to_port_error)?;

        let remaining_claims = usize::try_from(remaining).unwrap_or(usize::MAX);
        let item_status = item_status_after_cancel(remaining_claims);
        if let Some(status) = item_status {
            ItemRepository::set_status_on(&mut tx, item_id, status.into())
                .await
                .map_err(to_port_error)?;
        }

        tx.commit().await.map_err(to_port_error)?;
        info!(item_id = %claim.item_id, remaining, "Claim deleted");

        Ok(CancelledClaim { claim, item_status })
    }

    async fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimDetails>, ClaimError> {
        let rows = self
            .repository
            .list_for_item(item_id.into())
            .await
            .map_err(to_port_error)?;

        Ok(rows.into_iter().map(claim_details_from_row).collect())
    }

    async fn claims_for_user(&self, user_id: UserId) -> Result<Vec<ClaimDetails>, ClaimError> {
        let rows = self
            .repository
            .list_for_user(user_id.into())
            .await
            .map_err(to_port_error)?;

        Ok(rows.into_iter().map(claim_details_from_row).collect())
    }
}

impl From<DbClaimStatus> for ClaimStatus {
    fn from(status: DbClaimStatus) -> Self {
        match status {
            DbClaimStatus::Pending => ClaimStatus::Pending,
            DbClaimStatus::Verified => ClaimStatus::Verified,
            DbClaimStatus::Rejected => ClaimStatus::Rejected,
            DbClaimStatus::Completed => ClaimStatus::Completed,
        }
    }
}

impl From<ClaimStatus> for DbClaimStatus {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Pending => DbClaimStatus::Pending,
            ClaimStatus::Verified => DbClaimStatus::Verified,
            ClaimStatus::Rejected => DbClaimStatus::Rejected,
            ClaimStatus::Completed => DbClaimStatus::Completed,
        }
    }
}

fn claim_from_row(row: ClaimRow) -> Claim {
    Claim {
        id: ClaimId::from(row.id),
        item_id: ItemId::from(row.item_id),
        claimer_id: UserId::from(row.claimer_id),
        owner_id: row.owner_id.map(UserId::from),
        status: row.status.into(),
        verification_notes: row.verification_notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn claim_details_from_row(row: ClaimDetailsRow) -> ClaimDetails {
    let item = row.item_title.map(|title| ClaimedItem {
        title,
        description: row.item_description,
        image_url: row.item_image,
    });

    ClaimDetails {
        claim: claim_from_row(row.claim),
        item,
        claimer: PersonName::from_parts(row.claimer_first, row.claimer_last),
        owner: PersonName::from_parts(row.owner_first, row.owner_last),
    }
}
