//! Typed view structs per read use-case.
//!
//! Each view is built by a dedicated projection function from entities read
//! fresh for the request, never assembled ad hoc at call sites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gearshed_core::ItemId;
use gearshed_inventory::{classify_expiry, ExpiryStatus, Item, ItemKind, Location};

/// An item joined with its resolved storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemWithLocation {
    pub item: Item,
    pub location: Option<Location>,
}

/// The flat card the item list renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCardView {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: i64,
    pub min_quantity: i64,
    pub low_stock: bool,
    pub location_name: Option<String>,
    pub expiry: Option<ExpiryStatus>,
}

pub fn item_with_location(item: Item, locations: &[Location]) -> ItemWithLocation {
    let location = item
        .location_id
        .and_then(|id| locations.iter().find(|l| l.id == id).cloned());
    ItemWithLocation { item, location }
}

pub fn item_card(item: &Item, locations: &[Location], today: NaiveDate) -> ItemCardView {
    let location_name = item
        .location_id
        .and_then(|id| locations.iter().find(|l| l.id == id))
        .map(|l| l.name.clone());
    ItemCardView {
        id: item.id,
        name: item.name.clone(),
        kind: item.kind,
        quantity: item.quantity,
        min_quantity: item.min_quantity,
        low_stock: item.is_low_stock(),
        location_name,
        expiry: item.expiry_date.map(|d| classify_expiry(d, today)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gearshed_core::LocationId;

    #[test]
    fn card_resolves_location_and_expiry() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let location = Location {
            id: LocationId::new(),
            name: "blue container".to_string(),
            description: None,
        };
        let item = Item::register(
            ItemId::new(),
            "oatmeal",
            ItemKind::Food,
            2,
            5,
            Some(today + chrono::Duration::days(3)),
            Some(location.id),
            Utc::now(),
        )
        .unwrap();

        let card = item_card(&item, std::slice::from_ref(&location), today);
        assert_eq!(card.location_name.as_deref(), Some("blue container"));
        assert_eq!(card.expiry, Some(ExpiryStatus::Critical));
        assert!(card.low_stock);
    }

    #[test]
    fn unknown_location_projects_as_none() {
        let item = Item::register(
            ItemId::new(),
            "rope",
            ItemKind::Equipment,
            1,
            0,
            None,
            Some(LocationId::new()),
            Utc::now(),
        )
        .unwrap();
        let view = item_with_location(item, &[]);
        assert!(view.location.is_none());
    }
}
