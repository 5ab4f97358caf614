//! Shopping list derivation.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gearshed_core::ItemId;
use gearshed_inventory::{classify_expiry, ExpiryStatus, Item, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingPriority {
    High,
    Medium,
}

/// Why an item landed on the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ShoppingReason {
    LowStock { quantity: i64, min_quantity: i64 },
    ExpiringSoon { expiry_date: NaiveDate },
}

impl core::fmt::Display for ShoppingReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShoppingReason::LowStock {
                quantity,
                min_quantity,
            } => write!(f, "{quantity} on hand, minimum {min_quantity}"),
            ShoppingReason::ExpiringSoon { expiry_date } => {
                write!(f, "expires {expiry_date}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    pub item_id: ItemId,
    pub name: String,
    pub priority: ShoppingPriority,
    pub reason: ShoppingReason,
}

/// Derive the purchase list from current food stock.
///
/// Two rules, applied in order with first-match-wins deduplication: low
/// stock contributes at high priority with the count as the reason; items
/// expiring within seven days (inclusive) contribute with the date as the
/// reason, high priority when already expired or critical, otherwise
/// medium. An item matching both rules appears once, with the low-stock
/// reason.
pub fn shopping_list(items: &[Item], today: NaiveDate) -> Vec<ShoppingListEntry> {
    let mut listed: HashSet<ItemId> = HashSet::new();
    let mut entries = Vec::new();

    let food = || items.iter().filter(|i| i.kind == ItemKind::Food);

    for item in food() {
        if item.quantity <= item.min_quantity {
            listed.insert(item.id);
            entries.push(ShoppingListEntry {
                item_id: item.id,
                name: item.name.clone(),
                priority: ShoppingPriority::High,
                reason: ShoppingReason::LowStock {
                    quantity: item.quantity,
                    min_quantity: item.min_quantity,
                },
            });
        }
    }

    for item in food() {
        let Some(expiry_date) = item.expiry_date else {
            continue;
        };
        if (expiry_date - today).num_days() > 7 || listed.contains(&item.id) {
            continue;
        }
        let priority = match classify_expiry(expiry_date, today) {
            ExpiryStatus::Expired | ExpiryStatus::Critical => ShoppingPriority::High,
            _ => ShoppingPriority::Medium,
        };
        entries.push(ShoppingListEntry {
            item_id: item.id,
            name: item.name.clone(),
            priority,
            reason: ShoppingReason::ExpiringSoon { expiry_date },
        });
    }

    entries
}
