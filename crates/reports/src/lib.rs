//! Missing/damaged reports and the retirement path.
//!
//! A report moves forward through an admin response; only the transition to
//! `retired` touches stock (it zeroes the item's count).

pub mod report;

pub use report::{Report, ReportStatus, ReportType};
