//! Gear sets: named bundles of component items with required quantities.
//!
//! A set stores only its composition. Whether it can currently be assembled
//! is computed from live stock on every read and never cached, since
//! component stock moves independently of the set.

pub mod set;

pub use set::{ComponentStock, GearSet, SetComponent, SetCompleteness};
