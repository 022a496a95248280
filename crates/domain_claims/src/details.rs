//! Claim read model
//!
//! Claims are shown with the claimed item's headline fields and the names of
//! both parties. The joined parts are optional: a reader may race a delete,
//! and an item need not have a registered owner.

use serde::Serialize;

use core_kernel::PersonName;
use domain_items::Item;

use crate::claim::Claim;

/// Headline fields of the claimed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimedItem {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Item> for ClaimedItem {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimDetails {
    #[serde(flatten)]
    pub claim: Claim,
    pub item: Option<ClaimedItem>,
    pub claimer: Option<PersonName>,
    pub owner: Option<PersonName>,
}

impl ClaimDetails {
    /// Details with nothing joined
    pub fn bare(claim: Claim) -> Self {
        Self {
            claim,
            item: None,
            claimer: None,
            owner: None,
        }
    }
}

impl AsRef<Claim> for ClaimDetails {
    fn as_ref(&self) -> &Claim {
        &self.claim
    }
}
