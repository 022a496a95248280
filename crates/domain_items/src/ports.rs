//! Item Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, ItemId, PortError};

use crate::details::ItemDetails;
use crate::filter::{ItemFilter, ItemPage};
use crate::item::{Item, ItemStatus, ItemUpdate};

/// Storage for reported items
#[async_trait]
pub trait ItemStore: DomainPort {
    /// Finds an item by id
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, PortError>;

    /// Finds an item together with its reporter
    async fn find_item_details(&self, id: ItemId) -> Result<Option<ItemDetails>, PortError>;

    /// Returns one page of items matching the filter, newest first
    async fn list_items(&self, filter: &ItemFilter) -> Result<ItemPage, PortError>;

    /// Persists a newly reported item
    async fn insert_item(&self, item: Item) -> Result<Item, PortError>;

    /// Applies a partial update; `None` if the item does not exist
    async fn update_item(
        &self,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Option<Item>, PortError>;

    /// Overwrites the status; `None` if the item does not exist
    async fn set_item_status(
        &self,
        id: ItemId,
        status: ItemStatus,
    ) -> Result<Option<Item>, PortError>;

    /// Removes the item and its claims; `false` if nothing was deleted
    async fn delete_item(&self, id: ItemId) -> Result<bool, PortError>;
}
