//! Property-Based Test Generators
//!
//! proptest strategies for domain enums and identifiers, plus `fake`-backed
//! generators for realistic free-text input.

use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{ClaimId, ItemId, UserId};
use domain_claims::ClaimStatus;
use domain_identity::Registration;
use domain_items::{ItemCategory, ItemReport, ItemStatus};

/// Strategy for any item category
pub fn item_category_strategy() -> impl Strategy<Value = ItemCategory> {
    proptest::sample::select(ItemCategory::ALL.to_vec())
}

/// Strategy for any item status
pub fn item_status_strategy() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Lost),
        Just(ItemStatus::Found),
        Just(ItemStatus::Claimed),
    ]
}

/// Strategy for any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Verified),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Completed),
    ]
}

/// Strategy for the statuses staff may record on review
pub fn verification_outcome_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Verified),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Completed),
    ]
}

pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    any::<[u8; 16]>().prop_map(|bytes| UserId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

pub fn item_id_strategy() -> impl Strategy<Value = ItemId> {
    any::<[u8; 16]>().prop_map(|bytes| ItemId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    any::<[u8; 16]>().prop_map(|bytes| ClaimId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for campus names used in filtering tests
pub fn campus_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("North".to_string()),
        Just("Lakeshore".to_string()),
        Just("Downtown".to_string()),
    ]
}

/// A random registration with a unique-looking email and student id
pub fn fake_registration() -> Registration {
    let email: String = SafeEmail().fake();
    Registration {
        student_id: format!("N{:08}", (0..100_000_000u32).fake::<u32>()),
        email,
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        campus: "North".to_string(),
        program: None,
        password: (8usize..16).fake::<String>(),
    }
}

/// A random item report in the given category
pub fn fake_item_report(category: ItemCategory) -> ItemReport {
    let words: Vec<String> = Words(2..4).fake();
    ItemReport {
        title: words.join(" "),
        category,
        description: Some(Sentence(4..10).fake()),
        location: StreetName().fake(),
        campus: "North".to_string(),
        image_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_verification_outcomes_are_not_pending(status in verification_outcome_strategy()) {
            prop_assert!(status.is_verification_outcome());
        }

        #[test]
        fn test_category_strategy_round_trips(category in item_category_strategy()) {
            prop_assert_eq!(category.as_str().parse::<ItemCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_fake_item_report_has_title() {
        let report = fake_item_report(ItemCategory::Bags);
        assert!(!report.title.is_empty());
        assert_eq!(report.category, ItemCategory::Bags);
    }

    #[test]
    fn test_fake_registration_password_length() {
        let registration = fake_registration();
        assert!(registration.password.chars().count() >= 8);
        assert!(registration.email.contains('@'));
    }
}
