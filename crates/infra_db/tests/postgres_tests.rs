//! PostgreSQL adapter tests
//!
//! Each test gets its own container. Run with `cargo test -- --ignored`
//! on a machine with Docker.

use std::sync::Arc;

use core_kernel::{Actor, AdapterHealth, HealthCheckable, Pagination, PersonName, UserId};
use domain_claims::{ClaimAmendment, ClaimError, ClaimService, ClaimStatus};
use domain_identity::{AccountPolicy, AccountService, IdentityError};
use domain_items::{ItemError, ItemFilter, ItemService, ItemStatus};
use infra_db::{
    PostgresClaimAdapter, PostgresHealthCheck, PostgresItemAdapter, PostgresUserAdapter,
};
use sqlx::PgPool;
use test_utils::{db_test, ItemFixtures, RegistrationFixtures};

struct Services {
    accounts: AccountService,
    items: ItemService,
    claims: ClaimService,
}

fn services(pool: &PgPool) -> Services {
    Services {
        accounts: AccountService::new(
            Arc::new(PostgresUserAdapter::new(pool.clone())),
            AccountPolicy::default(),
        ),
        items: ItemService::new(Arc::new(PostgresItemAdapter::new(pool.clone()))),
        claims: ClaimService::new(Arc::new(PostgresClaimAdapter::new(pool.clone()))),
    }
}

async fn student_actors(services: &Services) -> (Actor, Actor) {
    let reporter = services
        .accounts
        .register(RegistrationFixtures::student())
        .await
        .unwrap();
    let claimer = services
        .accounts
        .register(RegistrationFixtures::other_student())
        .await
        .unwrap();
    (Actor::student(reporter.id), Actor::student(claimer.id))
}

db_test!(test_health_check_round_trips, |pool| {
    let result = PostgresHealthCheck::new(pool).health_check().await;
    assert_eq!(result.status, AdapterHealth::Healthy);
});

db_test!(test_duplicate_registration_hits_unique_constraint, |pool| {
    let services = services(&pool);
    services
        .accounts
        .register(RegistrationFixtures::student())
        .await
        .unwrap();

    let err = services
        .accounts
        .register(RegistrationFixtures::student())
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::DuplicateAccount(_)));

    let user = services
        .accounts
        .authenticate("jane.doe@student.humber.on.ca", test_utils::FIXTURE_PASSWORD)
        .await
        .unwrap();
    assert!(user.is_verified);
});

db_test!(test_listing_filters_and_search, |pool| {
    let services = services(&pool);
    let (reporter, _) = student_actors(&services).await;
    services.items.report_found(&reporter, ItemFixtures::laptop()).await.unwrap();
    services.items.report_lost(&reporter, ItemFixtures::keys()).await.unwrap();
    services.items.report_found(&reporter, ItemFixtures::textbook()).await.unwrap();

    let found = services
        .items
        .list(&ItemFilter::by_status(ItemStatus::Found))
        .await
        .unwrap();
    assert_eq!(found.total, 2);

    let page = services
        .items
        .list(&ItemFilter::default().paginate(Pagination::new(Some(2), Some(2), 100)))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pages(), 2);

    let literal_percent = ItemFilter {
        search: Some("%".to_string()),
        ..Default::default()
    };
    assert_eq!(services.items.list(&literal_percent).await.unwrap().total, 0);
});

db_test!(test_claim_round_trip_keeps_item_coupled, |pool| {
    let services = services(&pool);
    let (reporter, claimer) = student_actors(&services).await;
    let item = services
        .items
        .report_found(&reporter, ItemFixtures::laptop())
        .await
        .unwrap();

    let claim = services.claims.submit(&claimer, item.id).await.unwrap();
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert_eq!(claim.owner_id, Some(reporter.user_id));
    assert_eq!(services.items.get(item.id).await.unwrap().status, ItemStatus::Claimed);

    let again = services.claims.submit(&reporter, item.id).await.unwrap_err();
    assert!(matches!(again, ClaimError::ItemAlreadyClaimed(_)));

    let cancelled = services.claims.cancel(&claimer, claim.id).await.unwrap();
    assert_eq!(cancelled.item_status, Some(ItemStatus::Found));
    assert_eq!(services.items.get(item.id).await.unwrap().status, ItemStatus::Found);
});

db_test!(test_concurrent_claims_serialize_on_item_lock, |pool| {
    let services = Arc::new(services(&pool));
    let (reporter, claimer) = student_actors(&services).await;
    let item = services
        .items
        .report_found(&reporter, ItemFixtures::laptop())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for actor in [reporter, claimer, reporter, claimer] {
        let services = Arc::clone(&services);
        handles.push(tokio::spawn(async move {
            services.claims.submit(&actor, item.id).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(ClaimError::ItemAlreadyClaimed(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(services.claims.for_item(item.id).await.unwrap().len(), 1);
});

db_test!(test_deleting_item_cascades_claims, |pool| {
    let services = services(&pool);
    let (reporter, claimer) = student_actors(&services).await;
    let item = services
        .items
        .report_found(&reporter, ItemFixtures::laptop())
        .await
        .unwrap();
    let claim = services.claims.submit(&claimer, item.id).await.unwrap();

    services.items.delete(&reporter, item.id).await.unwrap();

    let lookup = services.claims.get(&claimer, claim.id).await.unwrap_err();
    assert!(matches!(lookup, ClaimError::ClaimNotFound(_)));
});

db_test!(test_reads_join_reporter_and_party_names, |pool| {
    let services = services(&pool);
    let (reporter, claimer) = student_actors(&services).await;
    let item = services
        .items
        .report_found(&reporter, ItemFixtures::laptop())
        .await
        .unwrap();

    let details = services.items.details(item.id).await.unwrap();
    let contact = details.reporter.unwrap();
    assert_eq!(contact.name, PersonName::new("Jane", "Doe"));
    assert_eq!(contact.email, "jane.doe@student.humber.on.ca");

    let campus_filter = ItemFilter {
        campus: Some(item.campus.clone()),
        ..Default::default()
    };
    let page = services.items.list(&campus_filter).await.unwrap();
    assert_eq!(page.total, 1);
    let listed = page.items[0].reporter.as_ref().map(|r| r.name.first_name.as_str());
    assert_eq!(listed, Some("Jane"));

    let claim = services.claims.submit(&claimer, item.id).await.unwrap();
    let joined = services.claims.get(&claimer, claim.id).await.unwrap();
    assert_eq!(joined.item.map(|i| i.title), Some(item.title.clone()));
    assert_eq!(joined.claimer, Some(PersonName::new("Sam", "Lee")));
    assert_eq!(joined.owner, Some(PersonName::new("Jane", "Doe")));

    let mine = services.claims.mine(&claimer).await.unwrap();
    assert_eq!(mine[0].owner, Some(PersonName::new("Jane", "Doe")));
    let for_item = services.claims.for_item(item.id).await.unwrap();
    assert_eq!(for_item[0].claimer, Some(PersonName::new("Sam", "Lee")));
});

db_test!(test_cancel_racing_item_delete_takes_locks_in_order, |pool| {
    let services = Arc::new(services(&pool));
    let (reporter, claimer) = student_actors(&services).await;

    for _ in 0..10 {
        let item = services
            .items
            .report_found(&reporter, ItemFixtures::keys())
            .await
            .unwrap();
        let claim = services.claims.submit(&claimer, item.id).await.unwrap();

        let cancel = {
            let services = Arc::clone(&services);
            tokio::spawn(async move { services.claims.cancel(&claimer, claim.id).await })
        };
        let delete = {
            let services = Arc::clone(&services);
            tokio::spawn(async move { services.items.delete(&reporter, item.id).await })
        };

        match cancel.await.unwrap() {
            Ok(_) | Err(ClaimError::ClaimNotFound(_)) => {}
            Err(other) => panic!("cancel failed: {other}"),
        }
        match delete.await.unwrap() {
            Ok(()) | Err(ItemError::ItemNotFound(_)) => {}
            Err(other) => panic!("delete failed: {other}"),
        }
        assert!(matches!(
            services.items.get(item.id).await,
            Err(ItemError::ItemNotFound(_))
        ));
    }
});

db_test!(test_concurrent_review_and_amendment_keep_staff_status, |pool| {
    let services = Arc::new(services(&pool));
    let (reporter, claimer) = student_actors(&services).await;
    let staff = Actor::staff(UserId::new());
    let item = services
        .items
        .report_found(&reporter, ItemFixtures::textbook())
        .await
        .unwrap();
    let claim = services.claims.submit(&claimer, item.id).await.unwrap();

    let mut handles = Vec::new();
    for round in 0..4 {
        let verifier = Arc::clone(&services);
        handles.push(tokio::spawn(async move {
            let notes = Some(format!("checked serial number, round {round}"));
            verifier
                .claims
                .verify(&staff, claim.id, ClaimStatus::Verified, notes)
                .await
                .map(|_| ())
        }));
        let amender = Arc::clone(&services);
        handles.push(tokio::spawn(async move {
            let amendment = ClaimAmendment {
                verification_notes: Some(format!("receipt attached, round {round}")),
                ..Default::default()
            };
            amender
                .claims
                .amend(&claimer, claim.id, amendment)
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = services.claims.get(&staff, claim.id).await.unwrap();
    assert_eq!(stored.claim.status, ClaimStatus::Verified);
    assert!(stored.claim.verification_notes.is_some());
});
