//! Entity store traits: the CRUD surface the core asks of persistence.
//!
//! Implementations promise simple equality/range filtering and nothing
//! fancier. The single non-CRUD operation is [`ItemStore::apply_stock`],
//! which every implementation must execute as one indivisible statement so
//! concurrent sessions cannot lose updates.

use gearshed_core::{ItemId, LoanId, ReportId, SetId, TripId};
use gearshed_inventory::{Item, StockOp};
use gearshed_loans::Loan;
use gearshed_provisions::FoodLogEntry;
use gearshed_reports::Report;
use gearshed_sets::GearSet;
use gearshed_trips::Trip;

use crate::error::StorageError;

/// Item persistence plus the atomic stock primitive.
pub trait ItemStore: Send + Sync {
    fn insert_item(&self, item: Item) -> Result<(), StorageError>;

    /// Update item metadata. The stored `quantity` is preserved; the ledger
    /// primitive below is the only writer of that column.
    fn update_item(&self, item: Item) -> Result<(), StorageError>;

    fn delete_item(&self, id: ItemId) -> Result<(), StorageError>;

    fn item(&self, id: ItemId) -> Result<Option<Item>, StorageError>;

    fn items(&self) -> Result<Vec<Item>, StorageError>;

    fn find_by_barcode(&self, barcode: &str) -> Result<Option<Item>, StorageError>;

    /// Apply one stock operation atomically and return the new count.
    ///
    /// Check and update happen inside the same indivisible step, never as
    /// read-then-write from the caller side. Decrements that would go
    /// negative fail with [`StorageError::InsufficientStock`] and leave the
    /// count untouched. Not idempotent: applying twice doubles the effect.
    fn apply_stock(&self, id: ItemId, op: StockOp) -> Result<i64, StorageError>;
}

/// Loan persistence.
pub trait LoanStore: Send + Sync {
    fn insert_loan(&self, loan: Loan) -> Result<(), StorageError>;

    fn update_loan(&self, loan: Loan) -> Result<(), StorageError>;

    fn loan(&self, id: LoanId) -> Result<Option<Loan>, StorageError>;

    fn active_loans(&self) -> Result<Vec<Loan>, StorageError>;

    fn active_loans_for_item(&self, item_id: ItemId) -> Result<Vec<Loan>, StorageError>;

    /// Newest-first window for the activity feed.
    fn recent_loans(&self, limit: usize) -> Result<Vec<Loan>, StorageError>;
}

/// Report persistence.
pub trait ReportStore: Send + Sync {
    fn insert_report(&self, report: Report) -> Result<(), StorageError>;

    fn update_report(&self, report: Report) -> Result<(), StorageError>;

    fn report(&self, id: ReportId) -> Result<Option<Report>, StorageError>;

    fn open_reports(&self) -> Result<Vec<Report>, StorageError>;

    /// Newest-first window for the activity feed.
    fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, StorageError>;
}

/// Food log persistence (append-only).
pub trait FoodLogStore: Send + Sync {
    fn append_food_log(&self, entry: FoodLogEntry) -> Result<(), StorageError>;

    fn food_logs_for_item(&self, item_id: ItemId) -> Result<Vec<FoodLogEntry>, StorageError>;

    /// Newest-first window for the activity feed.
    fn recent_food_logs(&self, limit: usize) -> Result<Vec<FoodLogEntry>, StorageError>;
}

/// Gear set persistence.
pub trait SetStore: Send + Sync {
    fn insert_set(&self, set: GearSet) -> Result<(), StorageError>;

    fn update_set(&self, set: GearSet) -> Result<(), StorageError>;

    fn delete_set(&self, id: SetId) -> Result<(), StorageError>;

    fn set(&self, id: SetId) -> Result<Option<GearSet>, StorageError>;

    fn sets(&self) -> Result<Vec<GearSet>, StorageError>;
}

/// Trip persistence.
pub trait TripStore: Send + Sync {
    fn insert_trip(&self, trip: Trip) -> Result<(), StorageError>;

    fn update_trip(&self, trip: Trip) -> Result<(), StorageError>;

    fn trip(&self, id: TripId) -> Result<Option<Trip>, StorageError>;

    fn trips(&self) -> Result<Vec<Trip>, StorageError>;
}
