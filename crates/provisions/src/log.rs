use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gearshed_core::{Entity, FoodLogId, ItemId, MemberId};
use gearshed_inventory::StockOp;

/// A stock-affecting food action.
///
/// The delta is always one unit per logged action; there is no batch form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodAction {
    Added,
    Used,
    Empty,
}

impl FoodAction {
    /// The ledger operation this action triggers.
    pub fn stock_op(&self) -> StockOp {
        match self {
            FoodAction::Added => StockOp::Increment { amount: 1 },
            FoodAction::Used => StockOp::Decrement { amount: 1 },
            FoodAction::Empty => StockOp::Zero,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FoodAction::Added => "added",
            FoodAction::Used => "used",
            FoodAction::Empty => "empty",
        }
    }
}

/// One line of the append-only food log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: FoodLogId,
    pub item_id: ItemId,
    pub actor: MemberId,
    pub action: FoodAction,
    pub quantity: i64,
    pub logged_at: DateTime<Utc>,
}

impl FoodLogEntry {
    pub fn record(
        id: FoodLogId,
        item_id: ItemId,
        actor: MemberId,
        action: FoodAction,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            actor,
            action,
            quantity: 1,
            logged_at,
        }
    }
}

impl Entity for FoodLogEntry {
    type Id = FoodLogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
