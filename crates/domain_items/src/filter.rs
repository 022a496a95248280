//! Filtered listing

use serde::Serialize;

use core_kernel::Pagination;

use crate::details::ItemDetails;
use crate::item::{Item, ItemCategory, ItemStatus};

/// Listing criteria; all present filters must match
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<ItemCategory>,
    pub campus: Option<String>,
    pub status: Option<ItemStatus>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl ItemFilter {
    pub fn by_status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Search term with surrounding whitespace removed, if any remains
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Evaluates the filter against a single item, ignoring pagination
    pub fn matches(&self, item: &Item) -> bool {
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if let Some(campus) = &self.campus {
            if *campus != item.campus {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let in_title = item.title.to_lowercase().contains(&term);
            let in_description = item
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

/// One page of listing results
#[derive(Debug, Clone, Serialize)]
pub struct ItemPage {
    pub items: Vec<ItemDetails>,
    /// Matching rows across all pages
    pub total: u64,
    pub pagination: Pagination,
}

impl ItemPage {
    pub fn pages(&self) -> u64 {
        self.pagination.total_pages(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemReport;
    use core_kernel::UserId;

    fn item(title: &str, description: Option<&str>, campus: &str) -> Item {
        Item::report(
            UserId::new(),
            ItemReport {
                title: title.to_string(),
                category: ItemCategory::Electronics,
                description: description.map(str::to_string),
                location: "Library".to_string(),
                campus: campus.to_string(),
                image_url: None,
            },
            ItemStatus::Found,
        )
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let filter = ItemFilter {
            search: Some("apple".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&item("Apple AirPods", None, "Main")));
        assert!(filter.matches(&item("MacBook", Some("has APPLE sticker"), "Main")));
        assert!(!filter.matches(&item("Car Keys", Some("Ford"), "Main")));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ItemFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), None);
        assert!(filter.matches(&item("Anything", None, "Main")));
    }

    #[test]
    fn test_filters_combine() {
        let filter = ItemFilter {
            campus: Some("Waterloo".to_string()),
            status: Some(ItemStatus::Found),
            ..Default::default()
        };
        assert!(filter.matches(&item("Gold Watch", None, "Waterloo")));
        assert!(!filter.matches(&item("Gold Watch", None, "Main")));
        let lost_only = ItemFilter::by_status(ItemStatus::Lost);
        assert!(!lost_only.matches(&item("Gold Watch", None, "Waterloo")));
    }
}
