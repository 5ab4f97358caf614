//! Storage error model.

use gearshed_core::ItemId;
use thiserror::Error;

/// Failure at the storage boundary.
///
/// `InsufficientStock` is the one business-meaningful variant: the atomic
/// decrement checked-and-refused inside the primitive, so callers can
/// surface it without ever having observed a negative count.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Duplicate(&'static str),

    #[error("insufficient stock for item {item_id}: have {have}, requested {requested}")]
    InsufficientStock {
        item_id: ItemId,
        have: i64,
        requested: i64,
    },

    /// The backing store rejected the read/write.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
