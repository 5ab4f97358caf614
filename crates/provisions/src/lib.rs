//! Food consumption log.
//!
//! An append-only trail of stock-affecting food actions. Entries are never
//! updated or deleted; each one maps to exactly one ledger operation.

pub mod log;

pub use log::{FoodAction, FoodLogEntry};
