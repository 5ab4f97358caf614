//! The quantity ledger: single owner of every stock mutation.

use std::sync::Arc;

use gearshed_core::ItemId;
use gearshed_inventory::StockOp;
use gearshed_store::ItemStore;

use crate::errors::ServiceResult;

/// Thin service over the store's atomic stock primitive.
///
/// Every mutation path (loans, food logging, retirement, trip activation)
/// goes through here, so a grep for `apply` finds every writer of an item's
/// count. Operations are deliberately not deduplicated: calling twice
/// doubles the effect, and callers own calling exactly once per logical
/// event.
pub struct StockLedger<S> {
    store: Arc<S>,
}

impl<S: ItemStore> StockLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Add to stock. No upper bound.
    pub fn increment(&self, item_id: ItemId, amount: i64) -> ServiceResult<i64> {
        let op = StockOp::increment(amount)?;
        self.apply(item_id, op)
    }

    /// Subtract from stock. Refused atomically if it would go negative.
    pub fn decrement(&self, item_id: ItemId, amount: i64) -> ServiceResult<i64> {
        let op = StockOp::decrement(amount)?;
        self.apply(item_id, op)
    }

    /// Unconditionally zero the count. Used only by report retirement and
    /// the food log's `empty` action.
    pub fn zero(&self, item_id: ItemId) -> ServiceResult<i64> {
        self.apply(item_id, StockOp::Zero)
    }

    /// Apply an already-decided operation.
    pub fn apply(&self, item_id: ItemId, op: StockOp) -> ServiceResult<i64> {
        let new_quantity = self.store.apply_stock(item_id, op)?;
        tracing::info!(%item_id, op = op.tag(), new_quantity, "stock updated");
        Ok(new_quantity)
    }
}

impl<S> Clone for StockLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
