//! Report handling and retirement.

use std::sync::Arc;

use serde_json::json;

use gearshed_core::{Actor, Clock, DomainError, ItemId, ReportId};
use gearshed_reports::{Report, ReportStatus, ReportType};
use gearshed_store::{ActivityLogEntry, AuditSink, ItemStore, ReportStore};

use crate::audit::record_activity;
use crate::errors::ServiceResult;
use crate::ledger::StockLedger;

pub struct ReportService<S> {
    store: Arc<S>,
    ledger: StockLedger<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ReportService<S>
where
    S: ReportStore + ItemStore + AuditSink,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: StockLedger::new(store.clone()),
            store,
            clock,
        }
    }

    pub fn file_report(
        &self,
        actor: &Actor,
        item_id: ItemId,
        report_type: ReportType,
        note: Option<String>,
    ) -> ServiceResult<Report> {
        let item = self
            .store
            .item(item_id)?
            .ok_or(DomainError::not_found("item"))?;

        let report = Report::file(
            ReportId::new(),
            item_id,
            actor.member_id,
            report_type,
            note,
            self.clock.now(),
        );
        self.store.insert_report(report.clone())?;

        let what = match report_type {
            ReportType::Missing => "missing",
            ReportType::Damaged => "damaged",
        };
        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "report.filed",
                "report",
                report.id,
                format!("reported {} {what}", item.name),
                self.clock.now(),
            ),
        );
        Ok(report)
    }

    /// Admin response moving the report forward. The transition to
    /// `retired` is the only one with a stock effect: the item's count is
    /// zeroed through the ledger.
    pub fn respond(
        &self,
        actor: &Actor,
        report_id: ReportId,
        new_status: ReportStatus,
        admin_response: Option<String>,
    ) -> ServiceResult<Report> {
        actor.require_admin()?;

        let mut report = self
            .store
            .report(report_id)?
            .ok_or(DomainError::not_found("report"))?;

        let stock_effect = report.respond(new_status, admin_response, self.clock.now())?;
        self.store.update_report(report.clone())?;

        if let Some(op) = stock_effect {
            self.ledger.apply(report.item_id, op)?;
            tracing::info!(item_id = %report.item_id, "item retired, stock zeroed");
        }

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                format!("report.{}", new_status.tag()),
                "report",
                report.id,
                format!("report marked {}", new_status.tag()),
                self.clock.now(),
            )
            .with_metadata(json!({ "item_id": report.item_id.to_string() })),
        );
        Ok(report)
    }

    pub fn open_reports(&self) -> ServiceResult<Vec<Report>> {
        Ok(self.store.open_reports()?)
    }
}
