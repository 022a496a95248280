//! Integration tests for domain_identity against the in-memory store

use std::sync::Arc;

use core_kernel::{Role, UserId};
use domain_identity::{AccountPolicy, AccountService, IdentityError};
use test_utils::{
    fake_registration, InMemoryStore, RegistrationFixtures, TestRegistrationBuilder,
    FIXTURE_PASSWORD,
};

fn service() -> AccountService {
    AccountService::new(Arc::new(InMemoryStore::new()), AccountPolicy::default())
}

mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_institutional_email_is_verified() {
        let accounts = service();

        let user = accounts.register(RegistrationFixtures::student()).await.unwrap();

        assert!(user.is_verified);
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.email, "jane.doe@student.humber.on.ca");
    }

    #[tokio::test]
    async fn test_register_external_email_is_not_verified() {
        let accounts = service();

        let user = accounts.register(RegistrationFixtures::external()).await.unwrap();

        assert!(!user.is_verified);
    }

    #[tokio::test]
    async fn test_configured_suffix_applies() {
        let accounts = AccountService::new(
            Arc::new(InMemoryStore::new()),
            AccountPolicy::new("@gmail.com"),
        );

        let external = accounts.register(RegistrationFixtures::external()).await.unwrap();
        let student = accounts.register(RegistrationFixtures::student()).await.unwrap();

        assert!(external.is_verified);
        assert!(!student.is_verified);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_case_insensitively() {
        let accounts = service();
        accounts.register(RegistrationFixtures::student()).await.unwrap();

        let result = accounts
            .register(
                TestRegistrationBuilder::new()
                    .with_email("  JANE.DOE@student.humber.on.ca")
                    .with_student_id("N99999999")
                    .build(),
            )
            .await;

        assert!(matches!(result, Err(IdentityError::DuplicateAccount(_))));
    }

    #[tokio::test]
    async fn test_duplicate_student_id_is_rejected() {
        let accounts = service();
        accounts.register(RegistrationFixtures::student()).await.unwrap();

        let result = accounts
            .register(
                TestRegistrationBuilder::new()
                    .with_email("different@student.humber.on.ca")
                    .build(),
            )
            .await;

        assert!(matches!(result, Err(IdentityError::DuplicateAccount(_))));
    }

    #[tokio::test]
    async fn test_registered_user_serializes_without_password() {
        let accounts = service();

        let user = accounts.register(fake_registration()).await.unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], serde_json::json!(user.id.as_uuid().to_string()));
        assert_eq!(json["role"], "student");
    }
}

mod authentication_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let accounts = service();
        let registered = accounts.register(RegistrationFixtures::student()).await.unwrap();

        let user = accounts
            .authenticate("Jane.Doe@student.humber.on.ca", FIXTURE_PASSWORD)
            .await
            .unwrap();

        assert_eq!(user.id, registered.id);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let accounts = service();
        accounts.register(RegistrationFixtures::student()).await.unwrap();

        let result = accounts
            .authenticate("jane.doe@student.humber.on.ca", "not-the-password")
            .await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_unknown_email() {
        let accounts = service();

        let result = accounts.authenticate("nobody@example.com", FIXTURE_PASSWORD).await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let accounts = service();
        let registered = accounts.register(RegistrationFixtures::other_student()).await.unwrap();

        let profile = accounts.profile(registered.id).await.unwrap();
        assert_eq!(profile, registered);

        let missing = accounts.profile(UserId::new()).await;
        assert!(matches!(missing, Err(IdentityError::UserNotFound(_))));
    }
}
