//! PostgreSQL Item Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, ItemId, PersonName, PortError, UserId};
use domain_items::{
    Item, ItemCategory, ItemDetails, ItemFilter, ItemPage, ItemStatus, ItemStore, ItemUpdate,
    Reporter,
};

use crate::error::to_port_error;
use crate::repositories::items::{
    ItemCategory as DbItemCategory, ItemChanges, ItemDetailsRow, ItemQuery, ItemRepository,
    ItemRow, ItemStatus as DbItemStatus, NewItemRecord,
};

/// PostgreSQL-backed implementation of [`ItemStore`]
#[derive(Debug, Clone)]
pub struct PostgresItemAdapter {
    repository: ItemRepository,
}

impl PostgresItemAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ItemRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresItemAdapter {}

#[async_trait]
impl ItemStore for PostgresItemAdapter {
    #[instrument(skip(self), fields(item_id = %id))]
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, PortError> {
        let row = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(item_from_row))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn find_item_details(&self, id: ItemId) -> Result<Option<ItemDetails>, PortError> {
        let row = self
            .repository
            .get_details(id.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(item_details_from_row))
    }

    #[instrument(skip(self))]
    async fn list_items(&self, filter: &ItemFilter) -> Result<ItemPage, PortError> {
        let query = ItemQuery {
            category: filter.category.map(Into::into),
            campus: filter.campus.clone(),
            status: filter.status.map(Into::into),
            search: filter.search_term().map(str::to_string),
            limit: i64::from(filter.pagination.limit()),
            offset: i64::try_from(filter.pagination.offset()).unwrap_or(i64::MAX),
        };

        let (rows, total) = self.repository.list(&query).await.map_err(to_port_error)?;
        debug!(returned = rows.len(), total, "Listed items");

        Ok(ItemPage {
            items: rows.into_iter().map(item_details_from_row).collect(),
            total: u64::try_from(total).unwrap_or(0),
            pagination: filter.pagination,
        })
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn insert_item(&self, item: Item) -> Result<Item, PortError> {
        let row = self
            .repository
            .insert(NewItemRecord {
                id: item.id.into(),
                title: item.title,
                category: item.category.into(),
                description: item.description,
                location: item.location,
                campus: item.campus,
                status: item.status.into(),
                image_url: item.image_url,
                reporter_id: item.reporter_id.into(),
                created_at: item.created_at,
            })
            .await
            .map_err(to_port_error)?;

        Ok(item_from_row(row))
    }

    #[instrument(skip(self, update), fields(item_id = %id))]
    async fn update_item(
        &self,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Option<Item>, PortError> {
        let changes = ItemChanges {
            title: update.title,
            category: update.category.map(Into::into),
            description: update.description,
            location: update.location,
            campus: update.campus,
        };

        let row = self
            .repository
            .update(id.into(), changes)
            .await
            .map_err(to_port_error)?;

        Ok(row.map(item_from_row))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn set_item_status(
        &self,
        id: ItemId,
        status: ItemStatus,
    ) -> Result<Option<Item>, PortError> {
        let row = self
            .repository
            .set_status(id.into(), status.into())
            .await
            .map_err(to_port_error)?;

        Ok(row.map(item_from_row))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete_item(&self, id: ItemId) -> Result<bool, PortError> {
        self.repository
            .delete(id.into())
            .await
            .map_err(to_port_error)
    }
}

impl From<DbItemCategory> for ItemCategory {
    fn from(category: DbItemCategory) -> Self {
        match category {
            DbItemCategory::Electronics => ItemCategory::Electronics,
            DbItemCategory::Textbooks => ItemCategory::Textbooks,
            DbItemCategory::Keys => ItemCategory::Keys,
            DbItemCategory::IdCards => ItemCategory::IdCards,
            DbItemCategory::Clothing => ItemCategory::Clothing,
            DbItemCategory::Bags => ItemCategory::Bags,
            DbItemCategory::Other => ItemCategory::Other,
        }
    }
}

impl From<ItemCategory> for DbItemCategory {
    fn from(category: ItemCategory) -> Self {
        match category {
            ItemCategory::Electronics => DbItemCategory::Electronics,
            ItemCategory::Textbooks => DbItemCategory::Textbooks,
            ItemCategory::Keys => DbItemCategory::Keys,
            ItemCategory::IdCards => DbItemCategory::IdCards,
            ItemCategory::Clothing => DbItemCategory::Clothing,
            ItemCategory::Bags => DbItemCategory::Bags,
            ItemCategory::Other => DbItemCategory::Other,
        }
    }
}

impl From<DbItemStatus> for ItemStatus {
    fn from(status: DbItemStatus) -> Self {
        match status {
            DbItemStatus::Lost => ItemStatus::Lost,
            DbItemStatus::Found => ItemStatus::Found,
            DbItemStatus::Claimed => ItemStatus::Claimed,
        }
    }
}

impl From<ItemStatus> for DbItemStatus {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Lost => DbItemStatus::Lost,
            ItemStatus::Found => DbItemStatus::Found,
            ItemStatus::Claimed => DbItemStatus::Claimed,
        }
    }
}

/// Converts an item row to the domain model
pub(crate) fn item_from_row(row: ItemRow) -> Item {
    Item {
        id: ItemId::from(row.id),
        title: row.title,
        category: row.category.into(),
        description: row.description,
        location: row.location,
        campus: row.campus,
        status: row.status.into(),
        image_url: row.image_url,
        reporter_id: UserId::from(row.reporter_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn item_details_from_row(row: ItemDetailsRow) -> ItemDetails {
    let name = PersonName::from_parts(row.reporter_first_name, row.reporter_last_name);
    let reporter = name
        .zip(row.reporter_email)
        .map(|(name, email)| Reporter { name, email });
    ItemDetails::new(item_from_row(row.item), reporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_maps_to_itself() {
        for category in ItemCategory::ALL {
            assert_eq!(ItemCategory::from(DbItemCategory::from(category)), category);
        }
    }

    #[test]
    fn test_every_status_maps_to_itself() {
        for status in [ItemStatus::Lost, ItemStatus::Found, ItemStatus::Claimed] {
            assert_eq!(ItemStatus::from(DbItemStatus::from(status)), status);
        }
    }
}
