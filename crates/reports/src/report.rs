use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gearshed_core::{DomainError, DomainResult, Entity, ItemId, MemberId, ReportId};
use gearshed_inventory::StockOp;

/// What happened to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Missing,
    Damaged,
}

/// Report lifecycle. Forward-only; a report never reopens, and `Retired`
/// accepts no further responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Acknowledged,
    Resolved,
    Retired,
}

impl ReportStatus {
    /// Short tag for logs and audit metadata.
    pub fn tag(self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Acknowledged => "acknowledged",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Retired => "retired",
        }
    }

    fn allows(self, next: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Open, Acknowledged) | (Open, Resolved) | (Open, Retired)
                | (Acknowledged, Retired)
                | (Resolved, Retired)
        )
    }
}

/// A member-filed report about one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub item_id: ItemId,
    pub reporter: MemberId,
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub note: Option<String>,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn file(
        id: ReportId,
        item_id: ItemId,
        reporter: MemberId,
        report_type: ReportType,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            reporter,
            report_type,
            status: ReportStatus::Open,
            note,
            admin_response: None,
            created_at: now,
            resolved_at: None,
        }
    }

    /// Apply an admin response, moving the report forward.
    ///
    /// Returns the stock side effect, which exists only for the transition
    /// to `Retired`: the item's count is zeroed. A resolution timestamp is
    /// stamped on `Resolved` and `Retired`.
    pub fn respond(
        &mut self,
        new_status: ReportStatus,
        admin_response: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<StockOp>> {
        if !self.status.allows(new_status) {
            return Err(DomainError::conflict(format!(
                "report cannot move from {:?} to {:?}",
                self.status, new_status
            )));
        }
        self.status = new_status;
        if admin_response.is_some() {
            self.admin_response = admin_response;
        }
        match new_status {
            ReportStatus::Resolved => {
                self.resolved_at = Some(now);
                Ok(None)
            }
            ReportStatus::Retired => {
                self.resolved_at = Some(now);
                Ok(Some(StockOp::Zero))
            }
            _ => Ok(None),
        }
    }
}

impl Entity for Report {
    type Id = ReportId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
