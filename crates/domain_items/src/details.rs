//! Item read model with the reporter's contact details

use serde::Serialize;

use core_kernel::PersonName;

use crate::item::Item;

/// The account that reported an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reporter {
    #[serde(flatten)]
    pub name: PersonName,
    pub email: String,
}

/// An item as listed and viewed; `reporter` is `None` when the reporting
/// account no longer resolves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetails {
    #[serde(flatten)]
    pub item: Item,
    pub reporter: Option<Reporter>,
}

impl ItemDetails {
    pub fn new(item: Item, reporter: Option<Reporter>) -> Self {
        Self { item, reporter }
    }
}

impl AsRef<Item> for ItemDetails {
    fn as_ref(&self) -> &Item {
        &self.item
    }
}
