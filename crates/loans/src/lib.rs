//! Loan domain module.
//!
//! Stock leaves custody through a loan and comes back through its return;
//! the matching ledger decrement/increment is issued by the service layer,
//! never here. This crate only decides what a valid loan is, when it may be
//! returned, and whether it is overdue.

pub mod loan;

pub use loan::{Loan, LoanPurpose, LoanStatus};
