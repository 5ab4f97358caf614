//! Dashboard aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gearshed_inventory::{classify_expiry, ExpiryStatus, Item};
use gearshed_loans::Loan;

/// Counters the dashboard header renders. Computed fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub active_loans: usize,
    pub open_reports: usize,
    pub low_stock_items: usize,
    pub overdue_loans: usize,
    pub expiring_soon: usize,
}

/// Aggregate over freshly read items, active loans and the open-report
/// count. "Expiring soon" means expired or inside the critical week.
pub fn summarize(
    items: &[Item],
    active_loans: &[Loan],
    open_reports: usize,
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        total_items: items.len(),
        active_loans: active_loans.len(),
        open_reports,
        low_stock_items: items.iter().filter(|i| i.is_low_stock()).count(),
        overdue_loans: active_loans.iter().filter(|l| l.is_overdue(today)).count(),
        expiring_soon: items
            .iter()
            .filter_map(|i| i.expiry_date)
            .filter(|d| {
                matches!(
                    classify_expiry(*d, today),
                    ExpiryStatus::Expired | ExpiryStatus::Critical
                )
            })
            .count(),
    }
}
