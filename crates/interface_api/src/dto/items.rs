//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ItemId, Pagination, UserId};
use domain_items::{
    Item, ItemCategory, ItemDetails, ItemFilter, ItemPage, ItemReport, ItemStatus, ItemUpdate,
};

use super::{parse_enum, parse_optional_enum};
use crate::error::ApiError;

/// Query string of `GET /items`
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
    pub campus: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListItemsQuery {
    pub fn into_filter(self, max_page_size: u32) -> Result<ItemFilter, ApiError> {
        Ok(ItemFilter {
            category: parse_optional_enum(self.category.as_deref())?,
            status: parse_optional_enum(self.status.as_deref())?,
            campus: self.campus.filter(|c| !c.trim().is_empty()),
            search: self.search,
            pagination: Pagination::new(self.page, self.limit, max_page_size),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportItemRequest {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location is required (max 255 characters)"))]
    pub location: String,
    #[validate(length(min = 1, max = 50, message = "Campus is required (max 50 characters)"))]
    pub campus: String,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

impl TryFrom<ReportItemRequest> for ItemReport {
    type Error = ApiError;

    fn try_from(req: ReportItemRequest) -> Result<Self, Self::Error> {
        Ok(ItemReport {
            category: parse_enum::<ItemCategory>(&req.category)?,
            title: req.title,
            description: req.description,
            location: req.location,
            campus: req.campus,
            image_url: req.image_url,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub campus: Option<String>,
}

impl TryFrom<UpdateItemRequest> for ItemUpdate {
    type Error = ApiError;

    fn try_from(req: UpdateItemRequest) -> Result<Self, Self::Error> {
        Ok(ItemUpdate {
            category: parse_optional_enum(req.category.as_deref())?,
            title: req.title,
            description: req.description,
            location: req.location,
            campus: req.campus,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemStatusRequest {
    pub status: String,
}

impl ItemStatusRequest {
    pub fn status(&self) -> Result<ItemStatus, ApiError> {
        parse_enum(&self.status)
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub title: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub location: String,
    pub campus: String,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    pub reporter_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            category: item.category,
            description: item.description,
            location: item.location,
            campus: item.campus,
            status: item.status,
            image_url: item.image_url,
            reporter_id: item.reporter_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Item with the reporter's name and email, as listed and viewed
#[derive(Debug, Serialize)]
pub struct ItemDetailsResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_email: Option<String>,
}

impl From<ItemDetails> for ItemDetailsResponse {
    fn from(details: ItemDetails) -> Self {
        let (first_name, last_name, user_email) = match details.reporter {
            Some(reporter) => (
                Some(reporter.name.first_name),
                Some(reporter.name.last_name),
                Some(reporter.email),
            ),
            None => (None, None, None),
        };
        Self {
            item: details.item.into(),
            first_name,
            last_name,
            user_email,
        }
    }
}

/// `{message, item}` reply to item mutations
#[derive(Debug, Serialize)]
pub struct ItemMutationResponse {
    pub message: String,
    pub item: ItemResponse,
}

impl ItemMutationResponse {
    pub fn new(message: impl Into<String>, item: Item) -> Self {
        Self {
            message: message.into(),
            item: item.into(),
        }
    }
}

/// Paginated listing envelope
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub page: u32,
    pub pages: u64,
    pub data: Vec<ItemDetailsResponse>,
}

impl From<ItemPage> for ItemListResponse {
    fn from(page: ItemPage) -> Self {
        let pages = page.pages();
        Self {
            success: true,
            count: page.items.len(),
            total: page.total,
            page: page.pagination.page(),
            pages,
            data: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_clamps_pagination() {
        let query = ListItemsQuery {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };

        let filter = query.into_filter(100).unwrap();
        assert_eq!(filter.pagination.page(), 1);
        assert_eq!(filter.pagination.limit(), 100);
    }

    #[test]
    fn test_query_rejects_unknown_category() {
        let query = ListItemsQuery {
            category: Some("furniture".into()),
            ..Default::default()
        };

        assert!(matches!(query.into_filter(100), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_report_title_length() {
        let req = ReportItemRequest {
            title: "x".repeat(101),
            category: "keys".into(),
            description: None,
            location: "Library".into(),
            campus: "North".into(),
            image_url: None,
        };

        assert!(req.validate().is_err());
    }
}
