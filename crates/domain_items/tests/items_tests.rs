//! Integration tests for domain_items against the in-memory store

use std::sync::Arc;

use core_kernel::{Actor, ItemId, Pagination, PersonName, UserId};
use domain_items::{
    ItemCategory, ItemError, ItemFilter, ItemService, ItemStatus, ItemStore, ItemUpdate,
};
use proptest::prelude::*;
use test_utils::{
    assert_item_status, assert_page, campus_strategy, item_category_strategy,
    item_status_strategy, InMemoryStore, ItemFixtures, TestItemBuilder,
};

fn service() -> (InMemoryStore, ItemService) {
    let store = InMemoryStore::new();
    let items = ItemService::new(Arc::new(store.clone()));
    (store, items)
}

mod reporting_tests {
    use super::*;

    #[tokio::test]
    async fn test_report_found_and_lost() {
        let (_, items) = service();
        let actor = Actor::student(UserId::new());

        let found = items.report_found(&actor, ItemFixtures::laptop()).await.unwrap();
        let lost = items.report_lost(&actor, ItemFixtures::keys()).await.unwrap();

        assert_item_status(&found, ItemStatus::Found);
        assert_item_status(&lost, ItemStatus::Lost);
        assert_eq!(found.reporter_id, actor.user_id);
        assert_eq!(items.get(found.id).await.unwrap(), found);
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let (_, items) = service();
        let missing = ItemId::new();

        let result = items.get(missing).await;

        assert!(matches!(result, Err(ItemError::ItemNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_details_carry_reporter_contact() {
        let (store, items) = service();
        let reporter = store.seed_user("Mary", "Jackson", "mary@uni.on.ca").await;
        let item = items
            .report_found(&Actor::student(reporter), ItemFixtures::laptop())
            .await
            .unwrap();

        let details = items.details(item.id).await.unwrap();
        assert_eq!(details.item, item);
        let contact = details.reporter.unwrap();
        assert_eq!(contact.name, PersonName::new("Mary", "Jackson"));
        assert_eq!(contact.email, "mary@uni.on.ca");

        let page = items.list(&ItemFilter::default()).await.unwrap();
        let listed = page.items[0].reporter.as_ref().map(|r| r.email.as_str());
        assert_eq!(listed, Some("mary@uni.on.ca"));
    }

    #[tokio::test]
    async fn test_details_without_registered_reporter() {
        let (_, items) = service();
        let item = items
            .report_lost(&Actor::student(UserId::new()), ItemFixtures::keys())
            .await
            .unwrap();

        assert_eq!(items.details(item.id).await.unwrap().reporter, None);
        assert!(matches!(
            items.details(ItemId::new()).await,
            Err(ItemError::ItemNotFound(_))
        ));
    }
}

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_filters_combine() {
        let (store, items) = service();
        for item in [
            TestItemBuilder::new().with_campus("North").with_category(ItemCategory::Keys).build(),
            TestItemBuilder::new().with_campus("North").with_category(ItemCategory::Bags).build(),
            TestItemBuilder::new()
                .with_campus("Lakeshore")
                .with_category(ItemCategory::Keys)
                .build(),
            TestItemBuilder::new()
                .with_campus("North")
                .with_category(ItemCategory::Keys)
                .with_status(ItemStatus::Lost)
                .build(),
        ] {
            store.insert_item(item).await.unwrap();
        }

        let filter = ItemFilter {
            category: Some(ItemCategory::Keys),
            campus: Some("North".to_string()),
            status: Some(ItemStatus::Found),
            ..Default::default()
        };
        let page = items.list(&filter).await.unwrap();

        assert_page(&page, 1, 1, 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (store, items) = service();
        store
            .insert_item(TestItemBuilder::new().with_title("Black Backpack").build())
            .await
            .unwrap();
        store
            .insert_item(
                TestItemBuilder::new()
                    .with_title("Water bottle")
                    .with_description("left next to a BACKPACK")
                    .build(),
            )
            .await
            .unwrap();
        store
            .insert_item(TestItemBuilder::new().with_title("Umbrella").build())
            .await
            .unwrap();

        let filter = ItemFilter {
            search: Some("backpack".to_string()),
            ..Default::default()
        };

        assert_eq!(items.list(&filter).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_pagination_newest_first() {
        let (store, items) = service();
        for minutes in 0..25 {
            store
                .insert_item(
                    TestItemBuilder::new()
                        .with_title(format!("Item {minutes}"))
                        .created_minutes_ago(minutes)
                        .build(),
                )
                .await
                .unwrap();
        }

        let first = items.list(&ItemFilter::default()).await.unwrap();
        assert_page(&first, 20, 25, 2);
        assert_eq!(first.items[0].item.title, "Item 0");

        let second = items
            .list(&ItemFilter::default().paginate(Pagination::new(Some(2), Some(20), 100)))
            .await
            .unwrap();
        assert_page(&second, 5, 25, 2);
        assert_eq!(second.items[4].item.title, "Item 24");

        let beyond = items
            .list(&ItemFilter::default().paginate(Pagination::new(Some(9), Some(20), 100)))
            .await
            .unwrap();
        assert_page(&beyond, 0, 25, 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_listing_matches_filter(
            seeded in proptest::collection::vec(
                (item_category_strategy(), item_status_strategy(), campus_strategy()),
                0..30,
            ),
            category in proptest::option::of(item_category_strategy()),
            status in proptest::option::of(item_status_strategy()),
            limit in 1u32..10,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (store, items) = service();
                for (c, s, campus) in &seeded {
                    store
                        .insert_item(
                            TestItemBuilder::new()
                                .with_category(*c)
                                .with_status(*s)
                                .with_campus(campus.clone())
                                .build(),
                        )
                        .await
                        .unwrap();
                }

                let filter = ItemFilter {
                    category,
                    status,
                    ..Default::default()
                }
                .paginate(Pagination::new(Some(1), Some(limit), 100));
                let page = items.list(&filter).await.unwrap();

                let expected = seeded
                    .iter()
                    .filter(|(c, s, _)| {
                        category.map_or(true, |x| x == *c) && status.map_or(true, |x| x == *s)
                    })
                    .count() as u64;
                assert_eq!(page.total, expected);
                assert_eq!(page.pages(), expected.div_ceil(u64::from(limit)));
                assert!(page.items.len() <= limit as usize);
                assert!(page.items.iter().all(|i| filter.matches(&i.item)));
            });
        }
    }
}

mod authorization_tests {
    use super::*;

    #[tokio::test]
    async fn test_reporter_may_update() {
        let (_, items) = service();
        let reporter = Actor::student(UserId::new());
        let item = items.report_found(&reporter, ItemFixtures::laptop()).await.unwrap();

        let updated = items
            .update(
                &reporter,
                item.id,
                ItemUpdate {
                    title: Some("MacBook Air".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "MacBook Air");
        assert_eq!(updated.location, item.location);
    }

    #[tokio::test]
    async fn test_stranger_may_not_update_or_delete() {
        let (store, items) = service();
        let item = items
            .report_found(&Actor::student(UserId::new()), ItemFixtures::keys())
            .await
            .unwrap();
        let stranger = Actor::student(UserId::new());

        let rename = ItemUpdate {
            title: Some("x".into()),
            ..Default::default()
        };
        let update = items.update(&stranger, item.id, rename).await;
        let delete = items.delete(&stranger, item.id).await;

        assert!(matches!(update, Err(ItemError::Forbidden(_))));
        assert!(matches!(delete, Err(ItemError::Forbidden(_))));
        assert_eq!(store.item_count().await, 1);
    }

    #[tokio::test]
    async fn test_staff_status_override() {
        let (_, items) = service();
        let reporter = Actor::student(UserId::new());
        let item = items.report_lost(&reporter, ItemFixtures::textbook()).await.unwrap();

        let denied = items.set_status(&reporter, item.id, ItemStatus::Found).await;
        assert!(matches!(denied, Err(ItemError::Forbidden(_))));

        let staff = Actor::staff(UserId::new());
        let updated = items.set_status(&staff, item.id, ItemStatus::Found).await.unwrap();
        assert_item_status(&updated, ItemStatus::Found);
    }

    #[tokio::test]
    async fn test_staff_may_delete_any_item() {
        let (store, items) = service();
        let item = items
            .report_found(&Actor::student(UserId::new()), ItemFixtures::laptop())
            .await
            .unwrap();

        items.delete(&Actor::staff(UserId::new()), item.id).await.unwrap();

        assert_eq!(store.item_count().await, 0);
        assert!(matches!(
            items.delete(&Actor::staff(UserId::new()), item.id).await,
            Err(ItemError::ItemNotFound(_))
        ));
    }
}
