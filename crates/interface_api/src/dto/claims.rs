//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ItemId, UserId};
use domain_claims::{Claim, ClaimAmendment, ClaimDetails, ClaimStatus};

use super::{parse_enum, parse_optional_enum};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SubmitClaimRequest {
    pub item_id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct VerifyClaimRequest {
    pub status: String,
    pub verification_notes: Option<String>,
}

impl VerifyClaimRequest {
    pub fn status(&self) -> Result<ClaimStatus, ApiError> {
        parse_enum(&self.status)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateClaimRequest {
    pub status: Option<String>,
    pub verification_notes: Option<String>,
}

impl TryFrom<UpdateClaimRequest> for ClaimAmendment {
    type Error = ApiError;

    fn try_from(req: UpdateClaimRequest) -> Result<Self, Self::Error> {
        Ok(ClaimAmendment {
            status: parse_optional_enum(req.status.as_deref())?,
            verification_notes: req.verification_notes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub item_id: ItemId,
    pub claimer_id: UserId,
    pub owner_id: Option<UserId>,
    pub status: ClaimStatus,
    pub verification_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id,
            item_id: claim.item_id,
            claimer_id: claim.claimer_id,
            owner_id: claim.owner_id,
            status: claim.status,
            verification_notes: claim.verification_notes,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

/// Claim with the claimed item and both parties' names
#[derive(Debug, Serialize)]
pub struct ClaimDetailsResponse {
    #[serde(flatten)]
    pub claim: ClaimResponse,
    pub item_title: Option<String>,
    pub item_description: Option<String>,
    pub item_image: Option<String>,
    pub claimer_first: Option<String>,
    pub claimer_last: Option<String>,
    pub owner_first: Option<String>,
    pub owner_last: Option<String>,
}

impl From<ClaimDetails> for ClaimDetailsResponse {
    fn from(details: ClaimDetails) -> Self {
        let (item_title, item_description, item_image) = match details.item {
            Some(item) => (Some(item.title), item.description, item.image_url),
            None => (None, None, None),
        };
        let (claimer_first, claimer_last) = details
            .claimer
            .map_or((None, None), |n| (Some(n.first_name), Some(n.last_name)));
        let (owner_first, owner_last) = details
            .owner
            .map_or((None, None), |n| (Some(n.first_name), Some(n.last_name)));

        Self {
            claim: details.claim.into(),
            item_title,
            item_description,
            item_image,
            claimer_first,
            claimer_last,
            owner_first,
            owner_last,
        }
    }
}

/// `{message, claim}` reply to claim mutations
#[derive(Debug, Serialize)]
pub struct ClaimMutationResponse {
    pub message: String,
    pub claim: ClaimResponse,
}

impl ClaimMutationResponse {
    pub fn new(message: impl Into<String>, claim: Claim) -> Self {
        Self {
            message: message.into(),
            claim: claim.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amendment_parses_status() {
        let req = UpdateClaimRequest {
            status: Some("completed".into()),
            verification_notes: None,
        };
        let amendment = ClaimAmendment::try_from(req).unwrap();
        assert_eq!(amendment.status, Some(ClaimStatus::Completed));

        let req = UpdateClaimRequest {
            status: Some("archived".into()),
            verification_notes: None,
        };
        assert!(ClaimAmendment::try_from(req).is_err());
    }

    #[test]
    fn test_details_flatten_joined_fields() {
        let claimer = UserId::new();
        let now = Utc::now();
        let claim = Claim {
            id: ClaimId::new(),
            item_id: ItemId::new(),
            claimer_id: claimer,
            owner_id: None,
            status: ClaimStatus::Pending,
            verification_notes: None,
            created_at: now,
            updated_at: now,
        };
        let details = ClaimDetails {
            item: Some(domain_claims::ClaimedItem {
                title: "Red Scarf".into(),
                description: None,
                image_url: Some("https://img/scarf.png".into()),
            }),
            claimer: Some(core_kernel::PersonName::new("Sam", "Lee")),
            ..ClaimDetails::bare(claim)
        };

        let json = serde_json::to_value(ClaimDetailsResponse::from(details)).unwrap();

        assert_eq!(json["claimer_id"], serde_json::json!(claimer));
        assert_eq!(json["item_title"], "Red Scarf");
        assert_eq!(json["item_image"], "https://img/scarf.png");
        assert_eq!(json["claimer_first"], "Sam");
        assert!(json["owner_first"].is_null());
    }
}
