use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gearshed_core::{DomainError, DomainResult, Entity, ItemId, LoanId, MemberId};
use gearshed_inventory::StockOp;

/// Loan lifecycle. `Returned` is terminal; there is no cancellation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

/// What the stock is leaving custody for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Private,
    ScoutTrip,
}

/// A quantity of one item out on loan to one borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub item_id: ItemId,
    pub borrower: MemberId,
    pub quantity: i64,
    pub purpose: LoanPurpose,
    pub trip_label: Option<String>,
    pub loan_date: DateTime<Utc>,
    pub expected_return: Option<NaiveDate>,
    pub actual_return: Option<DateTime<Utc>>,
    pub status: LoanStatus,
}

impl Loan {
    /// Decide a new active loan. The matching ledger decrement is issued by
    /// the caller as part of the same logical unit.
    #[allow(clippy::too_many_arguments)]
    pub fn issue(
        id: LoanId,
        item_id: ItemId,
        borrower: MemberId,
        quantity: i64,
        purpose: LoanPurpose,
        trip_label: Option<String>,
        expected_return: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("loan quantity must be positive"));
        }
        Ok(Self {
            id,
            item_id,
            borrower,
            quantity,
            purpose,
            trip_label,
            loan_date: now,
            expected_return,
            actual_return: None,
            status: LoanStatus::Active,
        })
    }

    /// The decrement this loan takes out of stock at creation.
    pub fn issue_op(&self) -> StockOp {
        StockOp::Decrement {
            amount: self.quantity,
        }
    }

    /// Transition to `Returned`, exactly once.
    ///
    /// Returns the increment to hand back to the ledger: always the
    /// quantity recorded at creation, never the item's current count.
    pub fn mark_returned(&mut self, now: DateTime<Utc>) -> DomainResult<StockOp> {
        if self.status == LoanStatus::Returned {
            return Err(DomainError::conflict("loan is already returned"));
        }
        self.status = LoanStatus::Returned;
        self.actual_return = Some(now);
        Ok(StockOp::Increment {
            amount: self.quantity,
        })
    }

    /// Overdue iff still active with a due date strictly in the past.
    ///
    /// Recomputed at query time; never persisted.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == LoanStatus::Active
            && self
                .expected_return
                .is_some_and(|due| due < today)
    }
}

impl Entity for Loan {
    type Id = LoanId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
