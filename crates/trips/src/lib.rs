//! Trip packing workflow.
//!
//! A trip carries a packing list of items and sets, moves strictly forward
//! through planning → packing → active → completed, and on activation hands
//! its packed concrete items to the service layer to be turned into loans.

pub mod trip;

pub use trip::{PackTarget, Trip, TripItem, TripStatus};
