//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CoreError, ItemId, UserId};
use domain_items::{Item, ItemStatus};

use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Submitted, awaiting staff review
    Pending,
    /// Ownership confirmed by staff
    Verified,
    /// Ownership denied
    Rejected,
    /// Item handed over
    Completed,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Verified => "verified",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Completed => "completed",
        }
    }

    /// True for the outcomes staff may record when reviewing a claim
    pub fn is_verification_outcome(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "verified" => Ok(ClaimStatus::Verified),
            "rejected" => Ok(ClaimStatus::Rejected),
            "completed" => Ok(ClaimStatus::Completed),
            other => Err(CoreError::unknown_variant("claim status", other)),
        }
    }
}

/// A user's claim of ownership over an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub item_id: ItemId,
    /// The user asserting ownership
    pub claimer_id: UserId,
    /// The item's reporter at the time of the claim
    pub owner_id: Option<UserId>,
    pub status: ClaimStatus,
    pub verification_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Opens a pending claim by `claimer_id` against `item`
    ///
    /// The caller is responsible for marking the item claimed in the same
    /// unit of work.
    ///
    /// # Errors
    ///
    /// `ItemAlreadyClaimed` if the item is already in the claimed state.
    pub fn open(item: &Item, claimer_id: UserId) -> Result<Self, ClaimError> {
        if !item.is_claimable() {
            return Err(ClaimError::ItemAlreadyClaimed(item.id));
        }

        let now = Utc::now();
        Ok(Self {
            id: ClaimId::new_v7(),
            item_id: item.id,
            claimer_id,
            owner_id: Some(item.reporter_id),
            status: ClaimStatus::Pending,
            verification_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records a staff verification outcome, replacing any earlier notes
    ///
    /// The current status is not consulted; any outcome may follow any
    /// other.
    pub fn record_verification(
        &mut self,
        status: ClaimStatus,
        notes: Option<String>,
    ) -> Result<(), ClaimError> {
        if !status.is_verification_outcome() {
            return Err(ClaimError::InvalidStatus(status.to_string()));
        }
        self.status = status;
        self.verification_notes = notes;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies a free-form amendment; absent fields keep their values
    pub fn amend(&mut self, amendment: &ClaimAmendment) {
        if let Some(status) = amendment.status {
            self.status = status;
        }
        if let Some(notes) = &amendment.verification_notes {
            self.verification_notes = Some(notes.clone());
        }
        self.updated_at = Utc::now();
    }

    /// Only pending claims may be withdrawn
    pub fn ensure_cancellable(&self) -> Result<(), ClaimError> {
        if self.status != ClaimStatus::Pending {
            return Err(ClaimError::NotCancellable { status: self.status });
        }
        Ok(())
    }

    /// True if `user_id` is the claimer or the item's owner
    pub fn involves(&self, user_id: UserId) -> bool {
        self.claimer_id == user_id || self.owner_id == Some(user_id)
    }
}

/// Partial update of a claim
#[derive(Debug, Clone, Default)]
pub struct ClaimAmendment {
    pub status: Option<ClaimStatus>,
    pub verification_notes: Option<String>,
}

impl ClaimAmendment {
    /// True if applying this amendment would change the status of `claim`
    pub fn changes_status_of(&self, claim: &Claim) -> bool {
        self.status.is_some_and(|s| s != claim.status)
    }
}

/// Item status to write after a claim is removed
///
/// `remaining` counts the claims still recorded against the item. The item
/// only leaves `claimed` once none remain.
pub fn item_status_after_cancel(remaining: usize) -> Option<ItemStatus> {
    (remaining == 0).then_some(ItemStatus::Found)
}
