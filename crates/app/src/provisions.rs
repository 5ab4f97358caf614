//! Food consumption logging.

use std::sync::Arc;

use serde_json::json;

use gearshed_core::{Actor, Clock, DomainError, FoodLogId, ItemId};
use gearshed_provisions::{FoodAction, FoodLogEntry};
use gearshed_store::{ActivityLogEntry, AuditSink, FoodLogStore, ItemStore};

use crate::audit::record_activity;
use crate::errors::ServiceResult;
use crate::ledger::StockLedger;

pub struct ProvisionService<S> {
    store: Arc<S>,
    ledger: StockLedger<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ProvisionService<S>
where
    S: ItemStore + FoodLogStore + AuditSink,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: StockLedger::new(store.clone()),
            store,
            clock,
        }
    }

    /// Log one food action: the ledger effect first (a rejected decrement
    /// means nothing is logged), then the append-only trail entry.
    pub fn log_food(
        &self,
        actor: &Actor,
        item_id: ItemId,
        action: FoodAction,
    ) -> ServiceResult<FoodLogEntry> {
        let item = self
            .store
            .item(item_id)?
            .ok_or(DomainError::not_found("item"))?;

        let new_quantity = self.ledger.apply(item_id, action.stock_op())?;

        let entry = FoodLogEntry::record(
            FoodLogId::new(),
            item_id,
            actor.member_id,
            action,
            self.clock.now(),
        );
        self.store.append_food_log(entry.clone())?;

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                format!("food.{}", action.tag()),
                "item",
                item_id,
                match action {
                    FoodAction::Added => format!("added 1 × {}", item.name),
                    FoodAction::Used => format!("used 1 × {}", item.name),
                    FoodAction::Empty => format!("marked {} empty", item.name),
                },
                self.clock.now(),
            )
            .with_metadata(json!({ "new_quantity": new_quantity })),
        );
        Ok(entry)
    }

    pub fn history_for_item(&self, item_id: ItemId) -> ServiceResult<Vec<FoodLogEntry>> {
        Ok(self.store.food_logs_for_item(item_id)?)
    }
}
