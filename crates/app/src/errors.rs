//! Service error model.

use thiserror::Error;

use gearshed_core::DomainError;
use gearshed_store::StorageError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of one service operation.
///
/// Validation and invariant failures arrive as [`DomainError`] before any
/// side effect; [`StorageError`] means the backing store rejected a
/// read/write and the operation was aborted at that point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// True when the failure is the atomic decrement refusing to overdraw.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(
            self,
            ServiceError::Storage(StorageError::InsufficientStock { .. })
        )
    }
}
