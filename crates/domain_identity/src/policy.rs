//! Account rules applied at registration

/// Suffix that marks an institutional address
pub const DEFAULT_VERIFIED_EMAIL_SUFFIX: &str = ".on.ca";

/// Registration policy
#[derive(Debug, Clone)]
pub struct AccountPolicy {
    verified_email_suffix: String,
}

impl AccountPolicy {
    pub fn new(verified_email_suffix: impl Into<String>) -> Self {
        Self {
            verified_email_suffix: verified_email_suffix.into().to_lowercase(),
        }
    }

    /// True when the address belongs to the institution
    pub fn is_verified_email(&self, email: &str) -> bool {
        !self.verified_email_suffix.is_empty()
            && normalize_email(email).ends_with(&self.verified_email_suffix)
    }
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFIED_EMAIL_SUFFIX)
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institutional_suffix_is_verified() {
        let policy = AccountPolicy::default();
        assert!(policy.is_verified_email("student@conestogac.on.ca"));
        assert!(policy.is_verified_email("  Staff@ConestogaC.ON.CA "));
        assert!(!policy.is_verified_email("someone@gmail.com"));
    }

    #[test]
    fn test_empty_suffix_verifies_nobody() {
        let policy = AccountPolicy::new("");
        assert!(!policy.is_verified_email("student@conestogac.on.ca"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@B.Com "), "a@b.com");
    }
}
