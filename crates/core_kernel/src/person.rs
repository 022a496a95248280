//! Display names of the people behind items and claims

use serde::{Deserialize, Serialize};

/// A user's name as shown next to the records they are involved in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

impl PersonName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Builds a name from joined columns; `None` unless both are present
    pub fn from_parts(first_name: Option<String>, last_name: Option<String>) -> Option<Self> {
        Some(Self::new(first_name?, last_name?))
    }
}
