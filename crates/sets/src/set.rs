use serde::{Deserialize, Serialize};

use gearshed_core::{DomainError, DomainResult, Entity, ItemId, SetId};

/// One required component of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetComponent {
    pub item_id: ItemId,
    pub quantity_needed: i64,
}

/// A named, ordered bundle of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSet {
    pub id: SetId,
    pub name: String,
    pub components: Vec<SetComponent>,
}

/// Live stock figures for one component, read fresh per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStock {
    pub quantity: i64,
    pub min_quantity: i64,
}

/// Can the set be assembled right now?
///
/// Precedence is `Missing` over `Low` over `Complete`: one short component
/// makes the whole set missing no matter how the others look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetCompleteness {
    Missing,
    Low,
    Complete,
}

impl GearSet {
    pub fn assemble(
        id: SetId,
        name: impl Into<String>,
        components: Vec<SetComponent>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("set name cannot be empty"));
        }
        if components.iter().any(|c| c.quantity_needed <= 0) {
            return Err(DomainError::validation(
                "component quantities must be positive",
            ));
        }
        Ok(Self {
            id,
            name,
            components,
        })
    }

    /// Evaluate completeness against current stock.
    ///
    /// `stock_of` is the read path into the item table; an unknown component
    /// counts as zero stock. Missing is checked first across all
    /// components, then low, so ties resolve in that order.
    pub fn completeness<F>(&self, stock_of: F) -> SetCompleteness
    where
        F: Fn(ItemId) -> Option<ComponentStock>,
    {
        let mut any_low = false;
        for component in &self.components {
            let stock = stock_of(component.item_id).unwrap_or(ComponentStock {
                quantity: 0,
                min_quantity: 0,
            });
            if stock.quantity < component.quantity_needed {
                return SetCompleteness::Missing;
            }
            if stock.quantity <= stock.min_quantity {
                any_low = true;
            }
        }
        if any_low {
            SetCompleteness::Low
        } else {
            SetCompleteness::Complete
        }
    }
}

impl Entity for GearSet {
    type Id = SetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
