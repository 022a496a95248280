//! Pre-built Test Fixtures
//!
//! Ready-to-use, predictable test data for unit and integration tests.

use core_kernel::{Actor, UserId};
use domain_identity::Registration;
use domain_items::{ItemCategory, ItemReport};

/// Password used by every fixture account
pub const FIXTURE_PASSWORD: &str = "correct-horse-battery";

/// Fixture for registration data
pub struct RegistrationFixtures;

impl RegistrationFixtures {
    /// A student with an institutional address
    pub fn student() -> Registration {
        Registration {
            student_id: "N01234567".to_string(),
            email: "Jane.Doe@student.humber.on.ca".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            campus: "North".to_string(),
            program: Some("Computer Programming".to_string()),
            password: FIXTURE_PASSWORD.to_string(),
        }
    }

    /// A second student, for claimer/reporter pairs
    pub fn other_student() -> Registration {
        Registration {
            student_id: "N07654321".to_string(),
            email: "sam.lee@student.humber.on.ca".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            campus: "Lakeshore".to_string(),
            program: None,
            password: FIXTURE_PASSWORD.to_string(),
        }
    }

    /// A user registering with a non-institutional address
    pub fn external() -> Registration {
        Registration {
            student_id: "EXT0001".to_string(),
            email: "visitor@gmail.com".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Visitor".to_string(),
            campus: "North".to_string(),
            program: None,
            password: FIXTURE_PASSWORD.to_string(),
        }
    }
}

/// Fixture for item reports
pub struct ItemFixtures;

impl ItemFixtures {
    pub fn laptop() -> ItemReport {
        ItemReport {
            title: "MacBook Pro 2021".to_string(),
            category: ItemCategory::Electronics,
            description: Some("Silver laptop with a sticker on the lid".to_string()),
            location: "Library Building, 2nd floor".to_string(),
            campus: "North".to_string(),
            image_url: None,
        }
    }

    pub fn keys() -> ItemReport {
        ItemReport {
            title: "Car keys".to_string(),
            category: ItemCategory::Keys,
            description: Some("Ford key fob on a red lanyard".to_string()),
            location: "Parking lot B".to_string(),
            campus: "Lakeshore".to_string(),
            image_url: Some("https://images.example.com/keys.jpg".to_string()),
        }
    }

    pub fn textbook() -> ItemReport {
        ItemReport {
            title: "Calculus textbook".to_string(),
            category: ItemCategory::Textbooks,
            description: None,
            location: "Room E204".to_string(),
            campus: "North".to_string(),
            image_url: None,
        }
    }
}

/// Fixture for caller identities
pub struct ActorFixtures;

impl ActorFixtures {
    pub fn student() -> Actor {
        Actor::student(UserId::new())
    }

    pub fn staff() -> Actor {
        Actor::staff(UserId::new())
    }
}
