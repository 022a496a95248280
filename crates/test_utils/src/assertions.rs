//! Custom Test Assertions
//!
//! Assertion helpers for domain invariants with messages that say which
//! entity broke them.

use domain_claims::{Claim, ClaimStatus};
use domain_items::{Item, ItemPage, ItemStatus};

/// Asserts the item/claim coupling: `claimed` exactly when claims exist
pub fn assert_claim_coupling(item: &Item, claims: &[Claim]) {
    let has_claims = claims.iter().any(|c| c.item_id == item.id);
    assert_eq!(
        item.status == ItemStatus::Claimed,
        has_claims,
        "Item {} has status {} but {} claim(s) recorded",
        item.id,
        item.status,
        claims.iter().filter(|c| c.item_id == item.id).count()
    );
}

/// Asserts an item's status
pub fn assert_item_status(item: &Item, expected: ItemStatus) {
    assert_eq!(
        item.status, expected,
        "Expected item {} to be {}, got {}",
        item.id, expected, item.status
    );
}

/// Asserts a claim's status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Expected claim {} to be {}, got {}",
        claim.id, expected, claim.status
    );
}

/// Asserts a listing page's counters
pub fn assert_page(page: &ItemPage, returned: usize, total: u64, pages: u64) {
    assert_eq!(page.items.len(), returned, "Unexpected number of items on page");
    assert_eq!(page.total, total, "Unexpected total");
    assert_eq!(page.pages(), pages, "Unexpected page count");
}

/// Asserts a list is ordered newest first
pub fn assert_newest_first<C: AsRef<Claim>>(claims: &[C]) {
    for pair in claims.windows(2) {
        let (first, second) = (pair[0].as_ref(), pair[1].as_ref());
        assert!(
            first.created_at >= second.created_at,
            "Claims out of order: {} ({}) before {} ({})",
            first.id,
            first.created_at,
            second.id,
            second.created_at
        );
    }
}
