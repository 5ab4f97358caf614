use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gearshed_core::{CategoryId, DomainError, DomainResult, Entity, ItemId, LocationId};

/// Item kind: durable equipment or perishable food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Equipment,
    Food,
}

/// An inventory item.
///
/// `quantity` is the authoritative on-hand count. Feature code never writes
/// it directly; every change goes through a [`StockOp`] applied by the
/// store's atomic primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: i64,
    /// Reorder threshold. Meaningful for food; 0 for equipment.
    pub min_quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub location_id: Option<LocationId>,
    pub category_ids: Vec<CategoryId>,
    pub barcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        id: ItemId,
        name: impl Into<String>,
        kind: ItemKind,
        quantity: i64,
        min_quantity: i64,
        expiry_date: Option<NaiveDate>,
        location_id: Option<LocationId>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("initial quantity cannot be negative"));
        }
        if min_quantity < 0 {
            return Err(DomainError::validation("min quantity cannot be negative"));
        }
        Ok(Self {
            id,
            name,
            kind,
            quantity,
            min_quantity,
            expiry_date,
            location_id,
            category_ids: Vec::new(),
            barcode: None,
            created_at,
        })
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_categories(mut self, category_ids: Vec<CategoryId>) -> Self {
        self.category_ids = category_ids;
        self
    }

    /// At or below the reorder threshold. Only food carries a threshold.
    pub fn is_low_stock(&self) -> bool {
        self.kind == ItemKind::Food && self.quantity <= self.min_quantity
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The three stock mutations the quantity ledger understands.
///
/// Construction is validated (`Increment`/`Decrement` amounts must be
/// positive); application is a pure fold so the store primitive can run it
/// under a single lock. Operations are not idempotent: applying one twice
/// doubles the effect, and deduplication is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StockOp {
    Increment { amount: i64 },
    Decrement { amount: i64 },
    Zero,
}

impl StockOp {
    pub fn increment(amount: i64) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::validation("increment amount must be positive"));
        }
        Ok(Self::Increment { amount })
    }

    pub fn decrement(amount: i64) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::validation("decrement amount must be positive"));
        }
        Ok(Self::Decrement { amount })
    }

    pub fn zero() -> Self {
        Self::Zero
    }

    /// Fold this operation into a quantity.
    ///
    /// Decrements that would drive the count negative are rejected; the
    /// store runs this check-and-apply as one indivisible step, which is
    /// what makes "no silent negative stock" hold under concurrent callers.
    pub fn apply_to(&self, quantity: i64) -> Result<i64, InsufficientStock> {
        match *self {
            StockOp::Increment { amount } => Ok(quantity + amount),
            StockOp::Decrement { amount } => {
                if quantity < amount {
                    Err(InsufficientStock {
                        have: quantity,
                        requested: amount,
                    })
                } else {
                    Ok(quantity - amount)
                }
            }
            StockOp::Zero => Ok(0),
        }
    }

    /// Short tag for logs and audit metadata.
    pub fn tag(&self) -> &'static str {
        match self {
            StockOp::Increment { .. } => "increment",
            StockOp::Decrement { .. } => "decrement",
            StockOp::Zero => "zero",
        }
    }
}

/// A decrement was larger than the on-hand count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientStock {
    pub have: i64,
    pub requested: i64,
}
