//! Black-box tests over the services wired to the in-memory store.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use gearshed_app::{
    Dashboard, ItemService, LoanService, NewItem, ProvisionService, ReportService, ServiceError,
    StepOutcome, TripService,
};
use gearshed_core::{Actor, Clock, FixedClock, ItemId, MemberId, Role};
use gearshed_inventory::{Item, ItemKind, Location};
use gearshed_loans::LoanPurpose;
use gearshed_provisions::FoodAction;
use gearshed_reports::{ReportStatus, ReportType};
use gearshed_sets::{GearSet, SetCompleteness, SetComponent};
use gearshed_store::{
    ActivityLogEntry, AuditSink, CachedReferenceData, InMemoryStore, ItemStore, LoanStore,
    SetStore, StorageError,
};
use gearshed_trips::{PackTarget, TripStatus};

fn harness() -> (Arc<InMemoryStore>, Arc<FixedClock>, Actor, Actor) {
    gearshed_observability::init();
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(FixedClock::at(
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
    ));
    let admin = Actor::new(MemberId::new(), "Odd", Role::Admin);
    let member = Actor::new(MemberId::new(), "Kari", Role::Member);
    (store, clock, admin, member)
}

fn register(
    store: &Arc<InMemoryStore>,
    clock: &Arc<FixedClock>,
    actor: &Actor,
    name: &str,
    kind: ItemKind,
    quantity: i64,
    min_quantity: i64,
    expiry_offset: Option<i64>,
) -> Item {
    let items = ItemService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    items
        .register(
            actor,
            NewItem {
                name: name.to_string(),
                kind,
                quantity,
                min_quantity,
                expiry_date: expiry_offset.map(|d| clock.today() + Duration::days(d)),
                location_id: None,
                category_ids: vec![],
                barcode: None,
            },
        )
        .unwrap()
}

#[test]
fn loan_roundtrip_moves_stock_through_the_ledger() {
    let (store, clock, admin, member) = harness();
    let item = register(&store, &clock, &admin, "tarp", ItemKind::Equipment, 5, 0, None);

    let loans = LoanService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    let loan = loans
        .create_loan(
            &member,
            item.id,
            member.member_id,
            3,
            LoanPurpose::Private,
            None,
            None,
        )
        .unwrap();

    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 2);

    // An unrelated restock must not change what the return gives back.
    store
        .apply_stock(item.id, gearshed_inventory::StockOp::Increment { amount: 10 })
        .unwrap();

    loans.return_loan(&member, loan.id).unwrap();
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 15);

    // Second return is rejected.
    assert!(loans.return_loan(&member, loan.id).is_err());
}

#[test]
fn overdrawing_loan_is_rejected_without_a_record() {
    let (store, clock, admin, member) = harness();
    let item = register(&store, &clock, &admin, "axe", ItemKind::Equipment, 2, 0, None);

    let loans = LoanService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    let err = loans
        .create_loan(
            &member,
            item.id,
            member.member_id,
            3,
            LoanPurpose::Private,
            None,
            None,
        )
        .unwrap_err();

    assert!(err.is_insufficient_stock());
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 2);
    assert!(loans.active_loans().unwrap().is_empty());
}

#[test]
fn overdue_is_derived_from_the_clock() {
    let (store, clock, admin, member) = harness();
    let item = register(&store, &clock, &admin, "lantern", ItemKind::Equipment, 4, 0, None);

    let loans = LoanService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    loans
        .create_loan(
            &member,
            item.id,
            member.member_id,
            1,
            LoanPurpose::Private,
            None,
            Some(clock.today() + Duration::days(2)),
        )
        .unwrap();

    assert!(loans.overdue_loans().unwrap().is_empty());
    clock.advance(Duration::days(3));
    assert_eq!(loans.overdue_loans().unwrap().len(), 1);
}

#[test]
fn food_actions_fold_into_stock_and_append_to_the_log() {
    let (store, clock, admin, member) = harness();
    let item = register(&store, &clock, &admin, "oatmeal", ItemKind::Food, 2, 1, None);

    let provisions = ProvisionService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    provisions.log_food(&member, item.id, FoodAction::Added).unwrap();
    provisions.log_food(&member, item.id, FoodAction::Used).unwrap();
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 2);

    provisions.log_food(&member, item.id, FoodAction::Empty).unwrap();
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 0);

    // Using from an empty shelf is refused and leaves no trail entry.
    let err = provisions
        .log_food(&member, item.id, FoodAction::Used)
        .unwrap_err();
    assert!(err.is_insufficient_stock());
    assert_eq!(provisions.history_for_item(item.id).unwrap().len(), 3);
}

#[test]
fn retirement_zeroes_stock_and_only_admins_respond() {
    let (store, clock, admin, member) = harness();
    let item = register(&store, &clock, &admin, "compass", ItemKind::Equipment, 7, 0, None);

    let reports = ReportService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    let report = reports
        .file_report(&member, item.id, ReportType::Missing, None)
        .unwrap();

    let err = reports
        .respond(&member, report.id, ReportStatus::Retired, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(gearshed_core::DomainError::Forbidden)
    ));

    reports
        .respond(&admin, report.id, ReportStatus::Acknowledged, Some("checking".into()))
        .unwrap();
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 7);

    reports
        .respond(&admin, report.id, ReportStatus::Retired, Some("gone".into()))
        .unwrap();
    assert_eq!(store.item(item.id).unwrap().unwrap().quantity, 0);
}

#[test]
fn trip_activation_is_a_best_effort_saga() {
    let (store, clock, admin, _member) = harness();
    let first = register(&store, &clock, &admin, "tent", ItemKind::Equipment, 10, 0, None);
    // The middle line cannot be satisfied: only 1 on hand, 2 packed.
    let second = register(&store, &clock, &admin, "stove", ItemKind::Equipment, 1, 0, None);
    let third = register(&store, &clock, &admin, "rope", ItemKind::Equipment, 6, 0, None);

    let trips = TripService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    let trip = trips
        .plan_trip(&admin, "summer camp", clock.today() + Duration::days(10), None)
        .unwrap();

    for (item, needed) in [(&first, 2), (&second, 2), (&third, 3)] {
        let line = trips
            .add_line(&admin, trip.id, PackTarget::Item { item_id: item.id }, needed)
            .unwrap();
        trips.set_packed(&admin, trip.id, line.id, true).unwrap();
    }

    trips.advance(&admin, trip.id, TripStatus::Packing).unwrap();
    let report = trips
        .advance(&admin, trip.id, TripStatus::Active)
        .unwrap()
        .expect("activation produces a saga report");

    assert_eq!(report.completed(), 2);
    assert_eq!(report.failed(), 1);
    let failed_step = report
        .steps
        .iter()
        .find(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
        .unwrap();
    assert_eq!(failed_step.label.item_id, second.id);

    // Partial failure never blocks the transition.
    assert_eq!(trips.trip(trip.id).unwrap().status, TripStatus::Active);

    // Stock moved only for the successful lines, via scout-trip loans.
    assert_eq!(store.item(first.id).unwrap().unwrap().quantity, 8);
    assert_eq!(store.item(second.id).unwrap().unwrap().quantity, 1);
    assert_eq!(store.item(third.id).unwrap().unwrap().quantity, 3);
    let active = store.active_loans().unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|l| l.purpose == LoanPurpose::ScoutTrip));
    assert!(active
        .iter()
        .all(|l| l.trip_label.as_deref() == Some("summer camp")));
}

#[test]
fn dashboard_reads_are_fresh_projections() {
    let (store, clock, admin, member) = harness();
    let location = Location {
        id: gearshed_core::LocationId::new(),
        name: "blue container".into(),
        description: None,
    };
    store.insert_location(location.clone()).unwrap();

    let rice = register(&store, &clock, &admin, "rice", ItemKind::Food, 1, 5, Some(3));
    let items = ItemService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    let tent = items
        .register(
            &admin,
            NewItem {
                name: "tent".into(),
                kind: ItemKind::Equipment,
                quantity: 4,
                min_quantity: 0,
                expiry_date: None,
                location_id: Some(location.id),
                category_ids: vec![],
                barcode: None,
            },
        )
        .unwrap();

    let set = GearSet::assemble(
        gearshed_core::SetId::new(),
        "patrol kitchen",
        vec![SetComponent {
            item_id: tent.id,
            quantity_needed: 2,
        }],
    )
    .unwrap();
    store.insert_set(set.clone()).unwrap();

    let loans = LoanService::new(store.clone(), clock.clone() as Arc<dyn Clock>);
    loans
        .create_loan(
            &member,
            tent.id,
            member.member_id,
            1,
            LoanPurpose::Private,
            None,
            Some(clock.today() - Duration::days(1)),
        )
        .unwrap();

    // Reference data goes through the TTL'd repository, not the raw store.
    let reference = CachedReferenceData::new(store.clone(), clock.clone());
    let dashboard = Dashboard::new(store.clone(), reference, clock.clone() as Arc<dyn Clock>);

    let cards = dashboard.item_cards().unwrap();
    let tent_card = cards.iter().find(|c| c.id == tent.id).unwrap();
    assert_eq!(tent_card.location_name.as_deref(), Some("blue container"));

    let summary = dashboard.summary().unwrap();
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.active_loans, 1);
    assert_eq!(summary.low_stock_items, 1);
    assert_eq!(summary.overdue_loans, 1);
    assert_eq!(summary.expiring_soon, 1);

    // Low stock beats the expiry rule and lists rice exactly once.
    let shopping = dashboard.shopping_list().unwrap();
    assert_eq!(shopping.len(), 1);
    assert_eq!(shopping[0].name, "rice");

    // Set completeness tracks live stock: with 3 tents left it is complete;
    // empty the shelf and it turns missing on the next read.
    assert_eq!(dashboard.set_status(set.id).unwrap(), SetCompleteness::Complete);
    store
        .apply_stock(tent.id, gearshed_inventory::StockOp::Zero)
        .unwrap();
    assert_eq!(dashboard.set_status(set.id).unwrap(), SetCompleteness::Missing);

    let feed = dashboard.activity_feed(10).unwrap();
    assert!(feed.iter().any(|e| e.description == "borrowed 1 × tent"));

    // The raw audit export carries everything the services recorded.
    assert!(dashboard.export_activity(50).unwrap().len() >= 3);
}

/// Store wrapper whose audit sink always fails; everything else delegates.
struct BrokenAuditStore(Arc<InMemoryStore>);

impl ItemStore for BrokenAuditStore {
    fn insert_item(&self, item: Item) -> Result<(), StorageError> {
        self.0.insert_item(item)
    }
    fn update_item(&self, item: Item) -> Result<(), StorageError> {
        self.0.update_item(item)
    }
    fn delete_item(&self, id: ItemId) -> Result<(), StorageError> {
        self.0.delete_item(id)
    }
    fn item(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        self.0.item(id)
    }
    fn items(&self) -> Result<Vec<Item>, StorageError> {
        self.0.items()
    }
    fn find_by_barcode(&self, barcode: &str) -> Result<Option<Item>, StorageError> {
        self.0.find_by_barcode(barcode)
    }
    fn apply_stock(
        &self,
        id: ItemId,
        op: gearshed_inventory::StockOp,
    ) -> Result<i64, StorageError> {
        self.0.apply_stock(id, op)
    }
}

impl LoanStore for BrokenAuditStore {
    fn insert_loan(&self, loan: gearshed_loans::Loan) -> Result<(), StorageError> {
        self.0.insert_loan(loan)
    }
    fn update_loan(&self, loan: gearshed_loans::Loan) -> Result<(), StorageError> {
        self.0.update_loan(loan)
    }
    fn loan(
        &self,
        id: gearshed_core::LoanId,
    ) -> Result<Option<gearshed_loans::Loan>, StorageError> {
        self.0.loan(id)
    }
    fn active_loans(&self) -> Result<Vec<gearshed_loans::Loan>, StorageError> {
        self.0.active_loans()
    }
    fn active_loans_for_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<gearshed_loans::Loan>, StorageError> {
        self.0.active_loans_for_item(item_id)
    }
    fn recent_loans(&self, limit: usize) -> Result<Vec<gearshed_loans::Loan>, StorageError> {
        self.0.recent_loans(limit)
    }
}

impl AuditSink for BrokenAuditStore {
    fn append_activity(&self, _entry: ActivityLogEntry) -> Result<(), StorageError> {
        Err(StorageError::backend("audit table unavailable"))
    }
    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>, StorageError> {
        self.0.recent_activity(limit)
    }
}

#[test]
fn audit_failures_never_fail_the_operation() {
    let (inner, clock, admin, member) = harness();
    let item = register(&inner, &clock, &admin, "saw", ItemKind::Equipment, 3, 0, None);

    let store = Arc::new(BrokenAuditStore(inner.clone()));
    let loans = LoanService::new(store, clock.clone() as Arc<dyn Clock>);

    let loan = loans
        .create_loan(
            &member,
            item.id,
            member.member_id,
            1,
            LoanPurpose::Private,
            None,
            None,
        )
        .unwrap();

    assert_eq!(inner.item(item.id).unwrap().unwrap().quantity, 2);
    loans.return_loan(&member, loan.id).unwrap();
    assert_eq!(inner.item(item.id).unwrap().unwrap().quantity, 3);
}
