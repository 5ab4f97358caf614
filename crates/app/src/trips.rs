//! Trip packing workflow orchestration.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use gearshed_core::{Actor, Clock, DomainError, ItemId, TripId, TripItemId};
use gearshed_loans::LoanPurpose;
use gearshed_store::{ActivityLogEntry, AuditSink, ItemStore, LoanStore, TripStore};
use gearshed_trips::{PackTarget, Trip, TripItem, TripStatus};

use crate::audit::record_activity;
use crate::errors::ServiceResult;
use crate::loans::LoanService;
use crate::saga::SagaReport;

/// Saga step label: one packed line converted into a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedLine {
    pub trip_item_id: TripItemId,
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Per-line outcomes of one activation run.
pub type ActivationReport = SagaReport<PackedLine>;

pub struct TripService<S> {
    store: Arc<S>,
    loans: LoanService<S>,
    clock: Arc<dyn Clock>,
}

impl<S> TripService<S>
where
    S: TripStore + ItemStore + LoanStore + AuditSink,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            loans: LoanService::new(store.clone(), clock.clone()),
            store,
            clock,
        }
    }

    pub fn plan_trip(
        &self,
        actor: &Actor,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
    ) -> ServiceResult<Trip> {
        let trip = Trip::plan(TripId::new(), name, starts_on, ends_on)?;
        self.store.insert_trip(trip.clone())?;

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "trip.planned",
                "trip",
                trip.id,
                format!("planned trip {}", trip.name),
                self.clock.now(),
            ),
        );
        Ok(trip)
    }

    pub fn add_line(
        &self,
        _actor: &Actor,
        trip_id: TripId,
        target: PackTarget,
        quantity_needed: i64,
    ) -> ServiceResult<TripItem> {
        let mut trip = self.fetch(trip_id)?;
        let line = TripItem::new(TripItemId::new(), target, quantity_needed)?;
        trip.add_item(line.clone())?;
        self.store.update_trip(trip)?;
        Ok(line)
    }

    /// Binary packed toggle on one line.
    pub fn set_packed(
        &self,
        actor: &Actor,
        trip_id: TripId,
        trip_item_id: TripItemId,
        checked: bool,
    ) -> ServiceResult<()> {
        let mut trip = self.fetch(trip_id)?;
        trip.item_mut(trip_item_id)?
            .set_packed(checked, actor.member_id, self.clock.now());
        self.store.update_trip(trip)?;
        Ok(())
    }

    /// Advance the trip one stage. Moving to `active` runs the activation
    /// saga and returns its per-line report; the trip reaches `active` even
    /// when some lines fail.
    pub fn advance(
        &self,
        actor: &Actor,
        trip_id: TripId,
        target: TripStatus,
    ) -> ServiceResult<Option<ActivationReport>> {
        actor.require_admin()?;

        let mut trip = self.fetch(trip_id)?;
        trip.advance_to(target)?;

        let report = if target == TripStatus::Active {
            Some(self.convert_packed_lines(actor, &trip))
        } else {
            None
        };

        self.store.update_trip(trip.clone())?;

        let metadata = match &report {
            Some(r) => json!({ "loans_created": r.completed(), "loans_failed": r.failed() }),
            None => serde_json::Value::Null,
        };
        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                format!("trip.{}", target.tag()),
                "trip",
                trip.id,
                format!("trip {} is now {}", trip.name, target.tag()),
                self.clock.now(),
            )
            .with_metadata(metadata),
        );
        Ok(report)
    }

    /// The activation saga: each packed concrete-item line independently
    /// becomes a scout-trip loan (insert + decrement). A failed line is
    /// recorded and skipped, never rolled back or retried.
    fn convert_packed_lines(&self, actor: &Actor, trip: &Trip) -> ActivationReport {
        let mut report = ActivationReport::new();

        for (line, item_id) in trip.packed_items() {
            let label = PackedLine {
                trip_item_id: line.id,
                item_id,
                quantity: line.quantity_packed,
            };
            let borrower = line.packed_by.unwrap_or(actor.member_id);
            report.run_step(label, || {
                self.loans
                    .create_loan(
                        actor,
                        item_id,
                        borrower,
                        line.quantity_packed,
                        LoanPurpose::ScoutTrip,
                        Some(trip.name.clone()),
                        trip.ends_on,
                    )
                    .map(|_| ())
            });
        }

        if report.has_failures() {
            tracing::warn!(
                trip_id = %trip.id,
                failed = report.failed(),
                completed = report.completed(),
                "trip activated with failed lines"
            );
        }
        report
    }

    pub fn trip(&self, trip_id: TripId) -> ServiceResult<Trip> {
        self.fetch(trip_id)
    }

    pub fn trips(&self) -> ServiceResult<Vec<Trip>> {
        Ok(self.store.trips()?)
    }

    fn fetch(&self, trip_id: TripId) -> ServiceResult<Trip> {
        Ok(self
            .store
            .trip(trip_id)?
            .ok_or(DomainError::not_found("trip"))?)
    }
}
