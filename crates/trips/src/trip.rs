use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gearshed_core::{DomainError, DomainResult, Entity, ItemId, MemberId, SetId, TripId, TripItemId};

/// Trip lifecycle. Strictly forward-moving, one stage at a time; there is
/// no regression and no automatic advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Packing,
    Active,
    Completed,
}

impl TripStatus {
    /// Short tag for logs and audit metadata.
    pub fn tag(self) -> &'static str {
        match self {
            TripStatus::Planning => "planning",
            TripStatus::Packing => "packing",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
        }
    }

    /// The only stage this one may advance to.
    pub fn next(self) -> Option<TripStatus> {
        match self {
            TripStatus::Planning => Some(TripStatus::Packing),
            TripStatus::Packing => Some(TripStatus::Active),
            TripStatus::Active => Some(TripStatus::Completed),
            TripStatus::Completed => None,
        }
    }
}

/// What a packing-list line points at: a concrete item or a whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PackTarget {
    Item { item_id: ItemId },
    Set { set_id: SetId },
}

/// One line on a trip's packing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripItem {
    pub id: TripItemId,
    pub target: PackTarget,
    pub quantity_needed: i64,
    /// Over-packing (`packed > needed`) is allowed and not flagged.
    pub quantity_packed: i64,
    pub packed_by: Option<MemberId>,
    pub packed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl TripItem {
    pub fn new(id: TripItemId, target: PackTarget, quantity_needed: i64) -> DomainResult<Self> {
        if quantity_needed <= 0 {
            return Err(DomainError::validation("needed quantity must be positive"));
        }
        Ok(Self {
            id,
            target,
            quantity_needed,
            quantity_packed: 0,
            packed_by: None,
            packed_at: None,
            notes: None,
        })
    }

    /// Binary packed toggle: checking packs the full needed quantity and
    /// records who packed it when; unchecking clears both.
    pub fn set_packed(&mut self, checked: bool, packer: MemberId, now: DateTime<Utc>) {
        if checked {
            self.quantity_packed = self.quantity_needed;
            self.packed_by = Some(packer);
            self.packed_at = Some(now);
        } else {
            self.quantity_packed = 0;
            self.packed_by = None;
            self.packed_at = None;
        }
    }

    pub fn is_fully_packed(&self) -> bool {
        self.quantity_packed >= self.quantity_needed
    }
}

/// A scheduled activity with a packing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub status: TripStatus,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub items: Vec<TripItem>,
}

impl Trip {
    pub fn plan(
        id: TripId,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("trip name cannot be empty"));
        }
        if let Some(end) = ends_on {
            if end < starts_on {
                return Err(DomainError::validation("trip cannot end before it starts"));
            }
        }
        Ok(Self {
            id,
            name,
            status: TripStatus::Planning,
            starts_on,
            ends_on,
            items: Vec::new(),
        })
    }

    /// Attach a packing-list line. Lines are only added before activation.
    pub fn add_item(&mut self, item: TripItem) -> DomainResult<()> {
        if matches!(self.status, TripStatus::Active | TripStatus::Completed) {
            return Err(DomainError::conflict(
                "packing list is closed once the trip is active",
            ));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn item_mut(&mut self, trip_item_id: TripItemId) -> DomainResult<&mut TripItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == trip_item_id)
            .ok_or(DomainError::not_found("trip item"))
    }

    /// Advance one stage forward. Any other target is rejected.
    pub fn advance_to(&mut self, target: TripStatus) -> DomainResult<()> {
        match self.status.next() {
            Some(next) if next == target => {
                self.status = target;
                Ok(())
            }
            _ => Err(DomainError::conflict(format!(
                "trip cannot move from {:?} to {:?}",
                self.status, target
            ))),
        }
    }

    /// Packed lines pointing at concrete items, the input to activation.
    pub fn packed_items(&self) -> impl Iterator<Item = (&TripItem, ItemId)> {
        self.items.iter().filter_map(|line| match line.target {
            PackTarget::Item { item_id } if line.quantity_packed > 0 => Some((line, item_id)),
            _ => None,
        })
    }

    /// Share of lines packed to at least their needed quantity.
    pub fn packed_progress(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let packed = self.items.iter().filter(|i| i.is_fully_packed()).count();
        packed as f64 / self.items.len() as f64
    }
}

impl Entity for Trip {
    type Id = TripId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_trip() -> Trip {
        Trip::plan(
            TripId::new(),
            "summer camp",
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 7, 8).unwrap()),
        )
        .unwrap()
    }

    fn item_line(needed: i64) -> TripItem {
        TripItem::new(
            TripItemId::new(),
            PackTarget::Item { item_id: ItemId::new() },
            needed,
        )
        .unwrap()
    }

    #[test]
    fn advances_one_stage_at_a_time() {
        let mut trip = test_trip();
        assert!(trip.advance_to(TripStatus::Active).is_err());
        trip.advance_to(TripStatus::Packing).unwrap();
        trip.advance_to(TripStatus::Active).unwrap();
        trip.advance_to(TripStatus::Completed).unwrap();
        assert!(trip.advance_to(TripStatus::Completed).is_err());
    }

    #[test]
    fn never_regresses() {
        let mut trip = test_trip();
        trip.advance_to(TripStatus::Packing).unwrap();
        assert!(trip.advance_to(TripStatus::Planning).is_err());
    }

    #[test]
    fn packed_toggle_is_binary_and_records_packer() {
        let mut line = item_line(4);
        let packer = MemberId::new();

        line.set_packed(true, packer, Utc::now());
        assert_eq!(line.quantity_packed, 4);
        assert_eq!(line.packed_by, Some(packer));
        assert!(line.packed_at.is_some());

        line.set_packed(false, packer, Utc::now());
        assert_eq!(line.quantity_packed, 0);
        assert_eq!(line.packed_by, None);
        assert_eq!(line.packed_at, None);
    }

    #[test]
    fn progress_counts_fully_packed_lines() {
        let mut trip = test_trip();
        assert_eq!(trip.packed_progress(), 0.0);

        let mut packed = item_line(2);
        packed.set_packed(true, MemberId::new(), Utc::now());
        trip.add_item(packed).unwrap();
        trip.add_item(item_line(3)).unwrap();

        assert!((trip.packed_progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn over_packing_still_counts_as_packed() {
        let mut line = item_line(2);
        line.quantity_packed = 5;
        assert!(line.is_fully_packed());
    }

    #[test]
    fn packed_items_skips_sets_and_unpacked_lines() {
        let mut trip = test_trip();
        let mut packed = item_line(2);
        packed.set_packed(true, MemberId::new(), Utc::now());
        trip.add_item(packed).unwrap();
        trip.add_item(item_line(1)).unwrap();
        trip.add_item(
            TripItem::new(
                TripItemId::new(),
                PackTarget::Set { set_id: SetId::new() },
                1,
            )
            .unwrap(),
        )
        .unwrap();

        assert_eq!(trip.packed_items().count(), 1);
    }

    #[test]
    fn packing_list_closes_at_activation() {
        let mut trip = test_trip();
        trip.advance_to(TripStatus::Packing).unwrap();
        trip.advance_to(TripStatus::Active).unwrap();
        let err = trip.add_item(item_line(1)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
