//! Test Data Builders
//!
//! Builders let a test set only the fields it cares about and take
//! defaults for the rest.

use chrono::{DateTime, Duration, Utc};
use core_kernel::{ItemId, UserId};
use domain_identity::Registration;
use domain_items::{Item, ItemCategory, ItemReport, ItemStatus};

use crate::fixtures::{ItemFixtures, RegistrationFixtures};

/// Builder for items inserted straight into a store
pub struct TestItemBuilder {
    id: ItemId,
    report: ItemReport,
    status: ItemStatus,
    reporter_id: UserId,
    created_at: DateTime<Utc>,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    /// A found laptop reported by a fresh user
    pub fn new() -> Self {
        Self {
            id: ItemId::new_v7(),
            report: ItemFixtures::laptop(),
            status: ItemStatus::Found,
            reporter_id: UserId::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.report.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.report.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.report.category = category;
        self
    }

    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.report.campus = campus.into();
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_reporter(mut self, reporter_id: UserId) -> Self {
        self.reporter_id = reporter_id;
        self
    }

    /// Backdates the item so listing order is deterministic
    pub fn created_minutes_ago(mut self, minutes: i64) -> Self {
        self.created_at = Utc::now() - Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> Item {
        let mut item = Item::report(self.reporter_id, self.report, self.status);
        item.id = self.id;
        item.created_at = self.created_at;
        item.updated_at = self.created_at;
        item
    }
}

/// Builder for registration input
pub struct TestRegistrationBuilder {
    registration: Registration,
}

impl Default for TestRegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistrationBuilder {
    pub fn new() -> Self {
        Self {
            registration: RegistrationFixtures::student(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.registration.email = email.into();
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.registration.student_id = student_id.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.registration.password = password.into();
        self
    }

    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.registration.campus = campus.into();
        self
    }

    pub fn build(self) -> Registration {
        self.registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder_defaults() {
        let item = TestItemBuilder::new().build();

        assert_eq!(item.status, ItemStatus::Found);
        assert_eq!(item.category, ItemCategory::Electronics);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_item_builder_overrides() {
        let reporter = UserId::new();
        let item = TestItemBuilder::new()
            .with_title("Blue umbrella")
            .with_category(ItemCategory::Other)
            .with_status(ItemStatus::Lost)
            .with_reporter(reporter)
            .build();

        assert_eq!(item.title, "Blue umbrella");
        assert_eq!(item.category, ItemCategory::Other);
        assert_eq!(item.status, ItemStatus::Lost);
        assert_eq!(item.reporter_id, reporter);
    }

    #[test]
    fn test_registration_builder() {
        let registration = TestRegistrationBuilder::new()
            .with_email("someone@example.com")
            .with_student_id("X1")
            .build();

        assert_eq!(registration.email, "someone@example.com");
        assert_eq!(registration.student_id, "X1");
    }
}
