//! Read accessors for dashboards and list views.
//!
//! Everything here reads fresh state per request and hands it to the pure
//! view functions; no result is cached across mutations.

use std::collections::HashMap;
use std::sync::Arc;

use gearshed_core::{Clock, DomainError, ItemId, SetId};
use gearshed_inventory::Item;
use gearshed_sets::{ComponentStock, SetCompleteness};
use gearshed_store::{
    ActivityLogEntry, AuditSink, FoodLogStore, ItemStore, LoanStore, ReferenceData, ReportStore,
    SetStore,
};
use gearshed_views::{
    item_card, merge_timeline, shopping_list, summarize, DashboardSummary, ItemCardView,
    ShoppingListEntry, TimelineEntry,
};

use crate::errors::ServiceResult;

pub struct Dashboard<S, R> {
    store: Arc<S>,
    reference: R,
    clock: Arc<dyn Clock>,
}

impl<S, R> Dashboard<S, R>
where
    S: ItemStore + LoanStore + ReportStore + FoodLogStore + SetStore + AuditSink,
    R: ReferenceData,
{
    pub fn new(store: Arc<S>, reference: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            reference,
            clock,
        }
    }

    pub fn summary(&self) -> ServiceResult<DashboardSummary> {
        let items = self.store.items()?;
        let active_loans = self.store.active_loans()?;
        let open_reports = self.store.open_reports()?.len();
        Ok(summarize(
            &items,
            &active_loans,
            open_reports,
            self.clock.today(),
        ))
    }

    /// The merged activity feed: bounded recent windows from the loan,
    /// report and food sources, rendered and sorted newest first.
    pub fn activity_feed(&self, limit: usize) -> ServiceResult<Vec<TimelineEntry>> {
        let names = self.item_names()?;
        let name_of = |id: ItemId| -> String {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| "unknown item".to_string())
        };

        let loans = self
            .store
            .recent_loans(limit)?
            .iter()
            .map(|l| TimelineEntry::from_loan(l, &name_of(l.item_id)))
            .collect();
        let reports = self
            .store
            .recent_reports(limit)?
            .iter()
            .map(|r| TimelineEntry::from_report(r, &name_of(r.item_id)))
            .collect();
        let food = self
            .store
            .recent_food_logs(limit)?
            .iter()
            .map(|e| TimelineEntry::from_food_log(e, &name_of(e.item_id)))
            .collect();

        let mut feed = merge_timeline(vec![loans, reports, food]);
        feed.truncate(limit);
        Ok(feed)
    }

    pub fn item_cards(&self) -> ServiceResult<Vec<ItemCardView>> {
        let locations = self.reference.locations()?;
        let today = self.clock.today();
        Ok(self
            .store
            .items()?
            .iter()
            .map(|item| item_card(item, &locations, today))
            .collect())
    }

    pub fn shopping_list(&self) -> ServiceResult<Vec<ShoppingListEntry>> {
        let items = self.store.items()?;
        Ok(shopping_list(&items, self.clock.today()))
    }

    /// Completeness of one set against live stock, recomputed per call.
    pub fn set_status(&self, set_id: SetId) -> ServiceResult<SetCompleteness> {
        let set = self
            .store
            .set(set_id)?
            .ok_or(DomainError::not_found("set"))?;
        let items: HashMap<ItemId, Item> = self
            .store
            .items()?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();
        Ok(set.completeness(|id| {
            items.get(&id).map(|i| ComponentStock {
                quantity: i.quantity,
                min_quantity: i.min_quantity,
            })
        }))
    }

    /// Raw audit window for export; mutation logic never reads this.
    pub fn export_activity(&self, limit: usize) -> ServiceResult<Vec<ActivityLogEntry>> {
        Ok(self.store.recent_activity(limit)?)
    }

    fn item_names(&self) -> ServiceResult<HashMap<ItemId, String>> {
        Ok(self
            .store
            .items()?
            .into_iter()
            .map(|i| (i.id, i.name))
            .collect())
    }
}
