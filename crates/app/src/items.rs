//! Item registration and upkeep.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use gearshed_core::{Actor, CategoryId, Clock, DomainError, ItemId, LocationId};
use gearshed_inventory::{Item, ItemKind};
use gearshed_store::{ActivityLogEntry, AuditSink, ItemStore, LoanStore};

use crate::audit::record_activity;
use crate::errors::ServiceResult;

/// Parameters for registering a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub kind: ItemKind,
    pub quantity: i64,
    pub min_quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub location_id: Option<LocationId>,
    pub category_ids: Vec<CategoryId>,
    pub barcode: Option<String>,
}

pub struct ItemService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ItemService<S>
where
    S: ItemStore + LoanStore + AuditSink,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn register(&self, actor: &Actor, new_item: NewItem) -> ServiceResult<Item> {
        let mut item = Item::register(
            ItemId::new(),
            new_item.name,
            new_item.kind,
            new_item.quantity,
            new_item.min_quantity,
            new_item.expiry_date,
            new_item.location_id,
            self.clock.now(),
        )?
        .with_categories(new_item.category_ids);
        if let Some(barcode) = new_item.barcode {
            item = item.with_barcode(barcode);
        }

        self.store.insert_item(item.clone())?;
        tracing::info!(item_id = %item.id, name = %item.name, "item registered");

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "item.registered",
                "item",
                item.id,
                format!("registered {} × {}", item.quantity, item.name),
                self.clock.now(),
            )
            .with_metadata(json!({ "quantity": item.quantity })),
        );
        Ok(item)
    }

    /// Update item metadata. The stored quantity is untouchable from here;
    /// the store primitive keeps ownership of that column.
    pub fn update(&self, actor: &Actor, item: Item) -> ServiceResult<()> {
        if item.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty").into());
        }
        self.store.update_item(item.clone())?;

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "item.updated",
                "item",
                item.id,
                format!("updated {}", item.name),
                self.clock.now(),
            ),
        );
        Ok(())
    }

    /// Remove an item. Refused while any active loan still references it.
    pub fn remove(&self, actor: &Actor, item_id: ItemId) -> ServiceResult<()> {
        let item = self
            .store
            .item(item_id)?
            .ok_or(DomainError::not_found("item"))?;
        if !self.store.active_loans_for_item(item_id)?.is_empty() {
            return Err(DomainError::conflict("item has active loans").into());
        }
        self.store.delete_item(item_id)?;

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "item.removed",
                "item",
                item_id,
                format!("removed {}", item.name),
                self.clock.now(),
            ),
        );
        Ok(())
    }

    /// Lookup for the barcode scanner integration.
    pub fn find_by_barcode(&self, barcode: &str) -> ServiceResult<Option<Item>> {
        Ok(self.store.find_by_barcode(barcode)?)
    }

    pub fn items(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.store.items()?)
    }
}
