//! Item aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, ItemId, UserId};

/// Closed set of item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Electronics,
    Textbooks,
    Keys,
    IdCards,
    Clothing,
    Bags,
    Other,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 7] = [
        ItemCategory::Electronics,
        ItemCategory::Textbooks,
        ItemCategory::Keys,
        ItemCategory::IdCards,
        ItemCategory::Clothing,
        ItemCategory::Bags,
        ItemCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronics => "electronics",
            ItemCategory::Textbooks => "textbooks",
            ItemCategory::Keys => "keys",
            ItemCategory::IdCards => "id_cards",
            ItemCategory::Clothing => "clothing",
            ItemCategory::Bags => "bags",
            ItemCategory::Other => "other",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::unknown_variant("category", s))
    }
}

/// Item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Reported missing by its owner
    Lost,
    /// Handed in or spotted, awaiting a claim
    Found,
    /// At least one claim is open against it
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
            ItemStatus::Claimed => "claimed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemStatus::Lost),
            "found" => Ok(ItemStatus::Found),
            "claimed" => Ok(ItemStatus::Claimed),
            other => Err(CoreError::unknown_variant("item status", other)),
        }
    }
}

/// A reported item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    /// Where the item was found, or last seen when lost
    pub location: String,
    pub campus: String,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    /// The user who reported the item
    pub reporter_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new item reported by `reporter_id`
    pub fn report(reporter_id: UserId, report: ItemReport, status: ItemStatus) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new_v7(),
            title: report.title,
            category: report.category,
            description: report.description,
            location: report.location,
            campus: report.campus,
            status,
            image_url: report.image_url,
            reporter_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// True if the item can still receive a claim
    pub fn is_claimable(&self) -> bool {
        self.status != ItemStatus::Claimed
    }
}

/// Fields supplied when reporting an item
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub title: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub location: String,
    pub campus: String,
    pub image_url: Option<String>,
}

/// Partial update of an item's descriptive fields
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub category: Option<ItemCategory>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub campus: Option<String>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.campus.is_none()
    }

    /// Applies the provided fields to `item`
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            item.location = location.clone();
        }
        if let Some(campus) = &self.campus {
            item.campus = campus.clone();
        }
        item.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ItemReport {
        ItemReport {
            title: "Red Backpack".to_string(),
            category: ItemCategory::Bags,
            description: None,
            location: "Parking Lot B".to_string(),
            campus: "Main".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("id_cards".parse::<ItemCategory>().unwrap(), ItemCategory::IdCards);
        assert!("furniture".parse::<ItemCategory>().is_err());
        for category in ItemCategory::ALL {
            assert_eq!(category.as_str().parse::<ItemCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ItemStatus::Claimed).unwrap();
        assert_eq!(json, "\"claimed\"");
    }

    #[test]
    fn test_claimed_item_is_not_claimable() {
        let mut item = Item::report(UserId::new(), report(), ItemStatus::Found);
        assert!(item.is_claimable());
        item.status = ItemStatus::Claimed;
        assert!(!item.is_claimable());
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut item = Item::report(UserId::new(), report(), ItemStatus::Found);
        let update = ItemUpdate {
            title: Some("Blue Backpack".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut item);

        assert_eq!(item.title, "Blue Backpack");
        assert_eq!(item.location, "Parking Lot B");
        assert_eq!(item.category, ItemCategory::Bags);
    }
}
