//! Unified activity timeline.
//!
//! Loans, reports and food log entries arrive as independently bounded
//! recent windows; the merger renders each with its own description
//! template and stably sorts the union by timestamp, newest first. Sources
//! are disjoint by entity type, so no deduplication is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gearshed_core::MemberId;
use gearshed_loans::{Loan, LoanStatus};
use gearshed_provisions::{FoodAction, FoodLogEntry};
use gearshed_reports::{Report, ReportStatus, ReportType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSource {
    Loan,
    Report,
    Food,
}

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub occurred_at: DateTime<Utc>,
    pub source: TimelineSource,
    pub actor: MemberId,
    pub entity_id: Uuid,
    pub description: String,
}

impl TimelineEntry {
    /// A returned loan renders (and sorts) at its return time; an active
    /// one at its loan date.
    pub fn from_loan(loan: &Loan, item_name: &str) -> Self {
        let (occurred_at, description) = match (loan.status, loan.actual_return) {
            (LoanStatus::Returned, Some(returned_at)) => (
                returned_at,
                format!("returned {} × {}", loan.quantity, item_name),
            ),
            _ => (
                loan.loan_date,
                format!("borrowed {} × {}", loan.quantity, item_name),
            ),
        };
        Self {
            occurred_at,
            source: TimelineSource::Loan,
            actor: loan.borrower,
            entity_id: (*loan.id.as_uuid()),
            description,
        }
    }

    pub fn from_report(report: &Report, item_name: &str) -> Self {
        let what = match report.report_type {
            ReportType::Missing => "missing",
            ReportType::Damaged => "damaged",
        };
        let description = match report.status {
            ReportStatus::Retired => format!("{item_name} reported {what}, now retired"),
            _ => format!("{item_name} reported {what}"),
        };
        Self {
            occurred_at: report.created_at,
            source: TimelineSource::Report,
            actor: report.reporter,
            entity_id: (*report.id.as_uuid()),
            description,
        }
    }

    pub fn from_food_log(entry: &FoodLogEntry, item_name: &str) -> Self {
        let description = match entry.action {
            FoodAction::Added => format!("added 1 × {item_name}"),
            FoodAction::Used => format!("used 1 × {item_name}"),
            FoodAction::Empty => format!("marked {item_name} empty"),
        };
        Self {
            occurred_at: entry.logged_at,
            source: TimelineSource::Food,
            actor: entry.actor,
            entity_id: (*entry.id.as_uuid()),
            description,
        }
    }
}

/// Merge per-source windows into one feed, newest first. The sort is
/// stable, so entries sharing a timestamp keep their source order.
pub fn merge_timeline(batches: Vec<Vec<TimelineEntry>>) -> Vec<TimelineEntry> {
    let mut merged: Vec<TimelineEntry> = batches.into_iter().flatten().collect();
    merged.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    merged
}
