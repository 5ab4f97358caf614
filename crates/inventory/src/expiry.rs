//! Expiry urgency buckets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Urgency bucket for a dated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Ok,
    Warning,
    Critical,
    Expired,
}

/// Classify an expiry date against today.
///
/// Buckets by whole days remaining: negative is `Expired`, under a week is
/// `Critical`, up to and including day 30 is `Warning`, beyond that `Ok`.
/// Day 7 itself is already `Warning`.
pub fn classify_expiry(expiry_date: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    let days_remaining = (expiry_date - today).num_days();
    if days_remaining < 0 {
        ExpiryStatus::Expired
    } else if days_remaining < 7 {
        ExpiryStatus::Critical
    } else if days_remaining <= 30 {
        ExpiryStatus::Warning
    } else {
        ExpiryStatus::Ok
    }
}
