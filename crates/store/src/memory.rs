//! In-memory store for tests and single-process deployments.
//!
//! One `RwLock` over the whole state keeps `apply_stock` trivially atomic:
//! the stock check and the write happen under a single write guard, which is
//! the in-memory analogue of an atomic column update.

use std::collections::HashMap;
use std::sync::RwLock;

use gearshed_core::{CategoryId, ItemId, LoanId, LocationId, ReportId, SetId, TripId};
use gearshed_inventory::{Category, Item, Location, StockOp};
use gearshed_loans::{Loan, LoanStatus};
use gearshed_provisions::FoodLogEntry;
use gearshed_reports::{Report, ReportStatus};
use gearshed_sets::GearSet;
use gearshed_trips::Trip;

use crate::audit::{ActivityLogEntry, AuditSink};
use crate::error::StorageError;
use crate::reference::ReferenceData;
use crate::stores::{FoodLogStore, ItemStore, LoanStore, ReportStore, SetStore, TripStore};

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<ItemId, Item>,
    loans: HashMap<LoanId, Loan>,
    reports: HashMap<ReportId, Report>,
    food_logs: Vec<FoodLogEntry>,
    sets: HashMap<SetId, GearSet>,
    trips: HashMap<TripId, Trip>,
    activity: Vec<ActivityLogEntry>,
    locations: HashMap<LocationId, Location>,
    categories: HashMap<CategoryId, Category>,
}

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|_| StorageError::backend("lock poisoned"))
    }

    /// Seed a storage location (reference data).
    pub fn insert_location(&self, location: Location) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner.locations.insert(location.id, location);
        Ok(())
    }

    /// Seed an item category (reference data).
    pub fn insert_category(&self, category: Category) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner.categories.insert(category.id, category);
        Ok(())
    }
}

impl ItemStore for InMemoryStore {
    fn insert_item(&self, item: Item) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.items.contains_key(&item.id) {
            return Err(StorageError::Duplicate("item"));
        }
        inner.items.insert(item.id, item);
        Ok(())
    }

    fn update_item(&self, mut item: Item) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        let existing = inner
            .items
            .get(&item.id)
            .ok_or(StorageError::NotFound("item"))?;
        // Quantity is owned by apply_stock; metadata updates cannot move it.
        item.quantity = existing.quantity;
        inner.items.insert(item.id, item);
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound("item"))
    }

    fn item(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        Ok(self.read()?.items.get(&id).cloned())
    }

    fn items(&self) -> Result<Vec<Item>, StorageError> {
        let inner = self.read()?;
        let mut items: Vec<Item> = inner.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn find_by_barcode(&self, barcode: &str) -> Result<Option<Item>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .items
            .values()
            .find(|i| i.barcode.as_deref() == Some(barcode))
            .cloned())
    }

    fn apply_stock(&self, id: ItemId, op: StockOp) -> Result<i64, StorageError> {
        let mut inner = self.write()?;
        let item = inner
            .items
            .get_mut(&id)
            .ok_or(StorageError::NotFound("item"))?;
        let next = op
            .apply_to(item.quantity)
            .map_err(|e| StorageError::InsufficientStock {
                item_id: id,
                have: e.have,
                requested: e.requested,
            })?;
        item.quantity = next;
        Ok(next)
    }
}

impl LoanStore for InMemoryStore {
    fn insert_loan(&self, loan: Loan) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.loans.contains_key(&loan.id) {
            return Err(StorageError::Duplicate("loan"));
        }
        inner.loans.insert(loan.id, loan);
        Ok(())
    }

    fn update_loan(&self, loan: Loan) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if !inner.loans.contains_key(&loan.id) {
            return Err(StorageError::NotFound("loan"));
        }
        inner.loans.insert(loan.id, loan);
        Ok(())
    }

    fn loan(&self, id: LoanId) -> Result<Option<Loan>, StorageError> {
        Ok(self.read()?.loans.get(&id).cloned())
    }

    fn active_loans(&self) -> Result<Vec<Loan>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .loans
            .values()
            .filter(|l| l.status == LoanStatus::Active)
            .cloned()
            .collect())
    }

    fn active_loans_for_item(&self, item_id: ItemId) -> Result<Vec<Loan>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .loans
            .values()
            .filter(|l| l.status == LoanStatus::Active && l.item_id == item_id)
            .cloned()
            .collect())
    }

    fn recent_loans(&self, limit: usize) -> Result<Vec<Loan>, StorageError> {
        let inner = self.read()?;
        let mut loans: Vec<Loan> = inner.loans.values().cloned().collect();
        loans.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));
        loans.truncate(limit);
        Ok(loans)
    }
}

impl ReportStore for InMemoryStore {
    fn insert_report(&self, report: Report) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.reports.contains_key(&report.id) {
            return Err(StorageError::Duplicate("report"));
        }
        inner.reports.insert(report.id, report);
        Ok(())
    }

    fn update_report(&self, report: Report) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if !inner.reports.contains_key(&report.id) {
            return Err(StorageError::NotFound("report"));
        }
        inner.reports.insert(report.id, report);
        Ok(())
    }

    fn report(&self, id: ReportId) -> Result<Option<Report>, StorageError> {
        Ok(self.read()?.reports.get(&id).cloned())
    }

    fn open_reports(&self) -> Result<Vec<Report>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .reports
            .values()
            .filter(|r| r.status == ReportStatus::Open)
            .cloned()
            .collect())
    }

    fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, StorageError> {
        let inner = self.read()?;
        let mut reports: Vec<Report> = inner.reports.values().cloned().collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(limit);
        Ok(reports)
    }
}

impl FoodLogStore for InMemoryStore {
    fn append_food_log(&self, entry: FoodLogEntry) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner.food_logs.push(entry);
        Ok(())
    }

    fn food_logs_for_item(&self, item_id: ItemId) -> Result<Vec<FoodLogEntry>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .food_logs
            .iter()
            .filter(|e| e.item_id == item_id)
            .cloned()
            .collect())
    }

    fn recent_food_logs(&self, limit: usize) -> Result<Vec<FoodLogEntry>, StorageError> {
        let inner = self.read()?;
        let mut entries: Vec<FoodLogEntry> = inner.food_logs.clone();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

impl SetStore for InMemoryStore {
    fn insert_set(&self, set: GearSet) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.sets.contains_key(&set.id) {
            return Err(StorageError::Duplicate("set"));
        }
        inner.sets.insert(set.id, set);
        Ok(())
    }

    fn update_set(&self, set: GearSet) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if !inner.sets.contains_key(&set.id) {
            return Err(StorageError::NotFound("set"));
        }
        inner.sets.insert(set.id, set);
        Ok(())
    }

    fn delete_set(&self, id: SetId) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner
            .sets
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound("set"))
    }

    fn set(&self, id: SetId) -> Result<Option<GearSet>, StorageError> {
        Ok(self.read()?.sets.get(&id).cloned())
    }

    fn sets(&self) -> Result<Vec<GearSet>, StorageError> {
        let inner = self.read()?;
        let mut sets: Vec<GearSet> = inner.sets.values().cloned().collect();
        sets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sets)
    }
}

impl TripStore for InMemoryStore {
    fn insert_trip(&self, trip: Trip) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.trips.contains_key(&trip.id) {
            return Err(StorageError::Duplicate("trip"));
        }
        inner.trips.insert(trip.id, trip);
        Ok(())
    }

    fn update_trip(&self, trip: Trip) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if !inner.trips.contains_key(&trip.id) {
            return Err(StorageError::NotFound("trip"));
        }
        inner.trips.insert(trip.id, trip);
        Ok(())
    }

    fn trip(&self, id: TripId) -> Result<Option<Trip>, StorageError> {
        Ok(self.read()?.trips.get(&id).cloned())
    }

    fn trips(&self) -> Result<Vec<Trip>, StorageError> {
        let inner = self.read()?;
        let mut trips: Vec<Trip> = inner.trips.values().cloned().collect();
        trips.sort_by(|a, b| a.starts_on.cmp(&b.starts_on));
        Ok(trips)
    }
}

impl AuditSink for InMemoryStore {
    fn append_activity(&self, entry: ActivityLogEntry) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        inner.activity.push(entry);
        Ok(())
    }

    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>, StorageError> {
        let inner = self.read()?;
        let mut entries: Vec<ActivityLogEntry> = inner.activity.clone();
        entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

impl ReferenceData for InMemoryStore {
    fn locations(&self) -> Result<Vec<Location>, StorageError> {
        let inner = self.read()?;
        let mut locations: Vec<Location> = inner.locations.values().cloned().collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }

    fn categories(&self) -> Result<Vec<Category>, StorageError> {
        let inner = self.read()?;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}
