//! Item use cases with owner/staff authorization

use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{Actor, ItemId};

use crate::details::ItemDetails;
use crate::error::ItemError;
use crate::filter::{ItemFilter, ItemPage};
use crate::item::{Item, ItemReport, ItemStatus, ItemUpdate};
use crate::ports::ItemStore;

#[derive(Clone)]
pub struct ItemService {
    items: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    pub async fn list(&self, filter: &ItemFilter) -> Result<ItemPage, ItemError> {
        Ok(self.items.list_items(filter).await?)
    }

    /// Item with its reporter, as shown to any signed-in user
    pub async fn details(&self, id: ItemId) -> Result<ItemDetails, ItemError> {
        self.items
            .find_item_details(id)
            .await?
            .ok_or(ItemError::ItemNotFound(id))
    }

    pub async fn get(&self, id: ItemId) -> Result<Item, ItemError> {
        self.items
            .find_item(id)
            .await?
            .ok_or(ItemError::ItemNotFound(id))
    }

    /// Records an item someone handed in or spotted
    #[instrument(skip(self, report), fields(user_id = %actor.user_id))]
    pub async fn report_found(
        &self,
        actor: &Actor,
        report: ItemReport,
    ) -> Result<Item, ItemError> {
        self.report(actor, report, ItemStatus::Found).await
    }

    /// Records an item its owner has lost
    #[instrument(skip(self, report), fields(user_id = %actor.user_id))]
    pub async fn report_lost(
        &self,
        actor: &Actor,
        report: ItemReport,
    ) -> Result<Item, ItemError> {
        self.report(actor, report, ItemStatus::Lost).await
    }

    async fn report(
        &self,
        actor: &Actor,
        report: ItemReport,
        status: ItemStatus,
    ) -> Result<Item, ItemError> {
        let item = self
            .items
            .insert_item(Item::report(actor.user_id, report, status))
            .await?;
        info!(item_id = %item.id, status = %item.status, "Item reported");
        Ok(item)
    }

    /// Edits descriptive fields; reporter or staff only
    pub async fn update(
        &self,
        actor: &Actor,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Item, ItemError> {
        let item = self.get(id).await?;
        if !actor.is_self_or_staff(item.reporter_id) {
            return Err(ItemError::Forbidden("update this item"));
        }
        if update.is_empty() {
            return Ok(item);
        }

        self.items
            .update_item(id, update)
            .await?
            .ok_or(ItemError::ItemNotFound(id))
    }

    /// Staff override of the item status
    ///
    /// Bypasses the claim coupling; existing claims are left untouched.
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn set_status(
        &self,
        actor: &Actor,
        id: ItemId,
        status: ItemStatus,
    ) -> Result<Item, ItemError> {
        if !actor.is_staff() {
            return Err(ItemError::Forbidden("change item status"));
        }

        let item = self
            .items
            .set_item_status(id, status)
            .await?
            .ok_or(ItemError::ItemNotFound(id))?;
        info!(item_id = %id, status = %status, "Item status overridden");
        Ok(item)
    }

    /// Deletes an item and its claims; reporter or staff only
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn delete(&self, actor: &Actor, id: ItemId) -> Result<(), ItemError> {
        let item = self.get(id).await?;
        if !actor.is_self_or_staff(item.reporter_id) {
            return Err(ItemError::Forbidden("delete this item"));
        }

        if !self.items.delete_item(id).await? {
            return Err(ItemError::ItemNotFound(id));
        }
        info!(item_id = %id, "Item deleted");
        Ok(())
    }
}
