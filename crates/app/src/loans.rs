//! Loan lifecycle orchestration.
//!
//! The loan record and its ledger effect form one logical unit. The stock
//! decrement runs first (it doubles as the availability check); if the
//! record insert then fails, the decrement is compensated and the error
//! surfaced, so no stock effect is left without a matching loan.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use gearshed_core::{Actor, Clock, DomainError, ItemId, LoanId, MemberId};
use gearshed_loans::{Loan, LoanPurpose};
use gearshed_store::{ActivityLogEntry, AuditSink, ItemStore, LoanStore};

use crate::audit::record_activity;
use crate::errors::ServiceResult;
use crate::ledger::StockLedger;

pub struct LoanService<S> {
    store: Arc<S>,
    ledger: StockLedger<S>,
    clock: Arc<dyn Clock>,
}

impl<S> LoanService<S>
where
    S: LoanStore + ItemStore + AuditSink,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: StockLedger::new(store.clone()),
            store,
            clock,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_loan(
        &self,
        actor: &Actor,
        item_id: ItemId,
        borrower: MemberId,
        quantity: i64,
        purpose: LoanPurpose,
        trip_label: Option<String>,
        expected_return: Option<NaiveDate>,
    ) -> ServiceResult<Loan> {
        let item = self
            .store
            .item(item_id)?
            .ok_or(DomainError::not_found("item"))?;

        let loan = Loan::issue(
            LoanId::new(),
            item_id,
            borrower,
            quantity,
            purpose,
            trip_label,
            expected_return,
            self.clock.now(),
        )?;

        self.ledger.apply(item_id, loan.issue_op())?;

        if let Err(insert_error) = self.store.insert_loan(loan.clone()) {
            // Give the stock back so the failed insert leaves no trace.
            if let Err(compensate_error) = self.ledger.increment(item_id, quantity) {
                tracing::error!(
                    %item_id,
                    %insert_error,
                    %compensate_error,
                    "loan insert failed and stock compensation failed"
                );
            }
            return Err(insert_error.into());
        }

        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "loan.created",
                "loan",
                loan.id,
                format!("borrowed {} × {}", loan.quantity, item.name),
                self.clock.now(),
            )
            .with_metadata(json!({
                "item_id": item_id.to_string(),
                "quantity": quantity,
            })),
        );
        Ok(loan)
    }

    /// Return a loan, incrementing stock by the quantity recorded at
    /// creation, never by the item's current count.
    pub fn return_loan(&self, actor: &Actor, loan_id: LoanId) -> ServiceResult<Loan> {
        let original = self
            .store
            .loan(loan_id)?
            .ok_or(DomainError::not_found("loan"))?;

        let mut loan = original.clone();
        let return_op = loan.mark_returned(self.clock.now())?;
        self.store.update_loan(loan.clone())?;

        if let Err(increment_error) = self.ledger.apply(loan.item_id, return_op) {
            // Restore the active record; the return did not happen.
            if let Err(restore_error) = self.store.update_loan(original) {
                tracing::error!(
                    %loan_id,
                    %increment_error,
                    %restore_error,
                    "return increment failed and loan restore failed"
                );
            }
            return Err(increment_error);
        }

        let item_name = self
            .store
            .item(loan.item_id)?
            .map(|i| i.name)
            .unwrap_or_else(|| "unknown item".to_string());
        record_activity(
            &*self.store,
            ActivityLogEntry::new(
                actor.member_id,
                actor.display_name.clone(),
                "loan.returned",
                "loan",
                loan.id,
                format!("returned {} × {}", loan.quantity, item_name),
                self.clock.now(),
            ),
        );
        Ok(loan)
    }

    pub fn active_loans(&self) -> ServiceResult<Vec<Loan>> {
        Ok(self.store.active_loans()?)
    }

    /// Active loans past their expected return date, derived at query time.
    pub fn overdue_loans(&self) -> ServiceResult<Vec<Loan>> {
        let today = self.clock.today();
        Ok(self
            .store
            .active_loans()?
            .into_iter()
            .filter(|l| l.is_overdue(today))
            .collect())
    }
}
